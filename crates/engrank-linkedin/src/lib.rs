pub mod client;
pub mod collect;
pub mod error;
pub mod normalize;
pub mod pagination;
mod retry;
pub mod types;

pub use client::LinkedinClient;
pub use collect::{
    collect_engagement, collect_engagement_at, extract_username, CollectionRun, PostEngagement,
    RunAggregates,
};
pub use error::LinkedinError;
pub use normalize::{largest_profile_picture, normalize_person};
pub use pagination::{Cursor, Paginated, Protocol, StopReason};
pub use types::{CommentAuthor, EngagementRecord, ProfilePicture, RawActor, RawComment, RawPost};
