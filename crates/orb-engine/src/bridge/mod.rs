pub mod protocol;

pub use protocol::{FrameCounts, ProtocolLayout};
