//! docgraph Rust SDK
//!
//! Client library for the document analysis service, plus the
//! upload/chat [`Controller`] that front ends drive.
//!
//! # Example
//!
//! ```no_run
//! use docgraph_sdk::{Controller, DocGraphClient, UploadFile};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DocGraphClient::new("http://localhost:8000");
//! let mut controller = Controller::new();
//!
//! let file = UploadFile::read("paper.pdf").await?;
//! controller.submit_file(&client, file, None).await?;
//!
//! controller.set_input("What is the paper about?");
//! controller.submit_question(&client).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod controller;
mod error;
mod service;
mod wire;

pub use client::DocGraphClient;
pub use controller::{
    Controller, GraphTicket, Outcome, QuestionTicket, UploadTicket,
};
pub use error::{ControllerError, SdkError};
pub use service::{ChatAnswer, DocumentService, UploadFile, UploadReceipt};
