//! Calls accepted by an [`Account`](crate::model::Account) activation.
//!
//! The first group is the public surface, exposed through
//! [`AccountClient`](crate::clients::AccountClient). `AddFollower`, `RemoveFollower`
//! and `NotifyNewPost` are sent by peer accounts. The last group is only ever sent by
//! an account to itself, to apply a state change after awaiting a peer.

use crate::account_actor::AccountError;
use crate::framework::Response;
use crate::model::PostId;

#[derive(Debug)]
pub enum AccountRequest {
    FollowUser {
        target: String,
        respond_to: Response<(), AccountError>,
    },
    UnfollowUser {
        target: String,
        respond_to: Response<(), AccountError>,
    },
    GetFollowingList(Response<Vec<String>, AccountError>),
    GetFollowersList(Response<Vec<String>, AccountError>),
    PublishPost {
        text: String,
        respond_to: Response<PostId, AccountError>,
    },
    GetPublishedPosts {
        count: i32,
        start: i32,
        respond_to: Response<Vec<PostId>, AccountError>,
    },
    GetReceivedPosts {
        count: i32,
        start: i32,
        respond_to: Response<Vec<PostId>, AccountError>,
    },

    // Peer calls
    AddFollower {
        username: String,
        respond_to: Response<(), AccountError>,
    },
    RemoveFollower {
        username: String,
        respond_to: Response<(), AccountError>,
    },
    NotifyNewPost {
        post_id: PostId,
        respond_to: Response<(), AccountError>,
    },

    // Continuations
    RecordSubscription {
        target: String,
        respond_to: Response<(), AccountError>,
    },
    ForgetSubscription {
        target: String,
        respond_to: Response<(), AccountError>,
    },
    RecordPublished {
        post_id: PostId,
        respond_to: Response<(), AccountError>,
    },
}
