pub mod config;
pub mod logging;

pub mod activity;
pub mod archive;
pub mod download;
pub mod http;
pub mod messages;
pub mod model;
pub mod naming;
pub mod populate;
pub mod resource;
pub mod storage;
pub mod version;

pub use download::{ConfigurationDownload, DownloadError, SavedArchive};
pub use model::{ClusterConfiguration, ClusterRef, ConfigurationSet, Session};
