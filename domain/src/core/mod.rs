//! Core value objects shared across all subdomains.
//!
//! - [`ids`]: identifier newtypes for sections, members, and projects
//! - [`member::Member`]: a team member with a display name
//! - [`project::Project`]: the product idea being aligned on

pub mod ids;
pub mod member;
pub mod project;

pub use ids::{MemberId, ProjectId, SectionId};
pub use member::Member;
pub use project::Project;
