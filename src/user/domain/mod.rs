//! Domain model for user accounts.
//!
//! Users carry the role that drives every task authorization decision, plus
//! the organizational data used for collaborator lookups and reports.

mod area;
mod document;
mod error;
mod ids;
mod role;
mod user;

pub use area::Area;
pub use document::DocumentType;
pub use error::{
    ParseAreaError, ParseDocumentTypeError, ParseUserRoleError, ParseUserStatusError,
    UserDomainError,
};
pub use ids::{Email, MAX_DOCUMENT_NUMBER_LEN, MAX_TEXT_LEN, UserId};
pub use role::{UserRole, UserStatus};
pub use user::{PersistedUserData, User, UserChanges, UserProfile, UserSummary};
