// Reads are public; writes are gated in `server::app` with `require_access`.
pub mod companies;
pub mod jobs;
pub mod system;
