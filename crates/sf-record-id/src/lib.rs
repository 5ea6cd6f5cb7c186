//! Salesforce record ID extraction
//!
//! This crate finds 15- and 18-character record IDs in the places they show up:
//! - Lightning and Classic record URLs (path, fragment, query parameters)
//! - Relative paths and arbitrary text
//! - Page snapshots, as a best-effort fallback
//!
//! Every extraction function is total. Malformed percent-encoding and
//! unparsable URLs degrade to a weaker match instead of an error, and
//! "no ID present" is `None`.
//!
//! ```
//! use sf_record_id::extract_account_id_from_url;
//!
//! let id = extract_account_id_from_url(
//!     "https://example.lightning.force.com/lightning/r/Account/0018c00002NIZJIAA5/view",
//! );
//! assert_eq!(id.unwrap().as_str(), "0018c00002NIZJIAA5");
//! ```

pub mod decode;
pub mod extract;
pub mod locate;
pub mod page;
pub mod pattern;
pub mod record_id;

pub use decode::*;
pub use extract::*;
pub use locate::*;
pub use page::*;
pub use record_id::*;
