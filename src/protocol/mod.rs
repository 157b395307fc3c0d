pub mod codec;


pub use codec::{read_frame, write_frame, Command, DecodeError, Frame, Reply, FRAME_SIZE};
