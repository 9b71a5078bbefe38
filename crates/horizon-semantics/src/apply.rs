//! Translation of a role into snapshot class, description and structure.

use horizon_semantics_core::Role;

use crate::locale::{Locale, RoleDescriptions};
use crate::logging::targets;
use crate::snapshot::{CollectionItemInfo, NodeSnapshot, SpannedText};

/// Apply `role` to `snapshot`.
///
/// An absent role is treated as [`Role::None`]. Sets the native class name,
/// the localized role description when `descriptions` has one for `locale`,
/// then the role-specific structure:
///
/// - [`Role::Link`] wraps the existing text or content description in a link
///   span
/// - [`Role::ImageButton`] marks the element clickable
/// - [`Role::Header`] marks the element as a single-cell heading item
///
/// Re-applying the same role and locale leaves the snapshot unchanged.
pub fn apply_role(
    snapshot: &mut NodeSnapshot,
    role: Option<Role>,
    locale: &Locale,
    descriptions: &dyn RoleDescriptions,
) {
    let role = role.unwrap_or_default();
    tracing::trace!(target: targets::APPLY, %role, %locale, "applying role");

    snapshot.class_name = Some(role.native_class().to_owned());

    if let Some(description) = descriptions.describe(role, locale) {
        snapshot.role_description = Some(description);
    }

    match role {
        Role::Link => {
            let payload = snapshot
                .text
                .as_ref()
                .map(|text| text.text().to_owned())
                .or_else(|| snapshot.content_description.clone());
            if let Some(payload) = payload {
                snapshot.text = Some(SpannedText::link(payload));
            }
        }
        Role::ImageButton => snapshot.clickable = true,
        Role::Header => snapshot.collection_item = Some(CollectionItemInfo::single_heading()),
        _ => {}
    }
}
