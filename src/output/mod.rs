mod hex;

pub use hex::HexDumpSink;
