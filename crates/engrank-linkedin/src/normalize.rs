//! Projection of raw engagement records onto [`PersonIdentity`].
//!
//! Reactions and reposts carry the actor at top level with a set of picture
//! sizes; comments nest the actor under `author` and never carry a picture.
//! Normalization never fails: a record without an actor id yields an identity
//! with `id: None`, which consumers drop.

use engrank_core::PersonIdentity;

use crate::types::{EngagementRecord, ProfilePicture, RawActor, RawComment};

/// Maps one raw record to a person identity.
#[must_use]
pub fn normalize_person(record: EngagementRecord<'_>) -> PersonIdentity {
    match record {
        EngagementRecord::Reaction(actor) | EngagementRecord::Repost(actor) => from_actor(actor),
        EngagementRecord::Comment(comment) => from_comment(comment),
    }
}

fn from_actor(actor: &RawActor) -> PersonIdentity {
    PersonIdentity {
        id: actor.urn.clone(),
        name: actor.full_name.clone(),
        profile_url: actor.profile_url.clone(),
        display_picture: actor
            .profile_picture
            .as_deref()
            .and_then(largest_profile_picture)
            .and_then(|p| p.url.clone()),
    }
}

fn from_comment(comment: &RawComment) -> PersonIdentity {
    let Some(author) = comment.author.as_ref() else {
        return PersonIdentity::default();
    };
    PersonIdentity {
        id: author.urn.clone(),
        name: author.name.clone(),
        profile_url: author.linkedin_url.clone(),
        display_picture: None,
    }
}

/// Picks the widest picture variant.
///
/// Left-to-right running max: a later variant replaces the current pick only
/// when it is strictly wider, so among equal widths the first one wins. A
/// variant without a width never replaces the pick (and is never replaced by
/// comparison if it came first). Returns `None` for an empty slice.
#[must_use]
pub fn largest_profile_picture(pictures: &[ProfilePicture]) -> Option<&ProfilePicture> {
    let (first, rest) = pictures.split_first()?;
    Some(rest.iter().fold(first, |max, current| {
        match (current.width, max.width) {
            (Some(c), Some(m)) if c > m => current,
            _ => max,
        }
    }))
}
