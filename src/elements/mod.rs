//! Structural elements module

mod member;
mod node;
mod plate;
mod section;
mod segment;
mod support;

pub use member::{Member, MemberReleases, MemberView};
pub use node::{DofState, Node};
pub use plate::{Plate, PlateActions, PlateView};
pub use section::Section;
pub use segment::{DeflectionDirection, Diagram, MemberSegments, MomentDirection, ShearDirection};
pub use support::Support;
