//! Promotion state machine
//!
//! ```text
//!   Domain(X) --promote--> Promoted(X)
//!   Promoted(X) --demote--> Domain(X)
//! ```
//!
//! There is no `Domain(X) -> Domain(Y)` edge, and a native `Main` record has
//! no edges at all.

use lifeboard_record::{Category, Placement, RecordHeader};

use crate::error::TransitionError;

/// Move a domain record under main, remembering its domain
pub(crate) fn promote(header: &mut RecordHeader) -> Result<Placement, TransitionError> {
    match header.placement() {
        Placement::Domain(domain) => {
            header.original_category = Some(domain);
            header.category = Category::Main;
            Ok(Placement::Promoted(domain))
        }
        Placement::Promoted(domain) => Err(TransitionError::AlreadyPromoted(domain)),
        Placement::Main => Err(TransitionError::NativeMain),
    }
}

/// Send a promoted record back to the domain it came from
pub(crate) fn demote(header: &mut RecordHeader) -> Result<Placement, TransitionError> {
    match header.placement() {
        Placement::Promoted(domain) => {
            header.category = domain.category();
            header.original_category = None;
            Ok(Placement::Domain(domain))
        }
        Placement::Domain(_) | Placement::Main => Err(TransitionError::NotPromoted),
    }
}
