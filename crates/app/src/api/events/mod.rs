pub mod download;
pub mod list;
pub mod write;

pub use download::DownloadEventRequest;
pub use list::ListEventsRequest;
pub use write::WriteEventRequest;
