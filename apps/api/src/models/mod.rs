// Database row models shared across modules.

pub mod candidate;
