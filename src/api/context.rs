//! Request context round-tripped through the host.
//!
//! Every request carries a context map that Zellij hands back with the
//! response. It records which call was made (with the ids needed to patch local
//! state) and the mount id of the screen that issued it, so responses addressed
//! to a screen that has since been replaced can be dropped.

use crate::domain::ApplicationStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const REQUEST_KEY: &str = "request";
const MOUNT_KEY: &str = "mount";

/// Which API call a response belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestTag {
    ListJobs,
    LookupPoster,
    CreateJob,
    PostedJobs,
    SetStatus {
        application_id: String,
        status: ApplicationStatus,
    },
    OwnerDeleteJob {
        job_id: String,
    },
    OwnerDeleteApplication {
        application_id: String,
    },
    AdminOverview,
    VerifyJob {
        job_id: String,
    },
    AdminDeleteJob {
        job_id: String,
    },
    AdminDeleteApplication {
        application_id: String,
    },
    AppliedJobs,
    WithdrawApplication {
        application_id: String,
    },
    SubmitApplication {
        job_id: String,
    },
    RegisterUser,
}

/// Context attached to a request and echoed back with its response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub tag: RequestTag,
    /// Mount id of the screen that issued the request.
    pub mount: u64,
}

impl RequestContext {
    /// Encodes the context as the string map the host expects.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        if let Ok(tag) = serde_json::to_string(&self.tag) {
            map.insert(REQUEST_KEY.to_string(), tag);
        }
        map.insert(MOUNT_KEY.to_string(), self.mount.to_string());
        map
    }

    /// Decodes a context map; `None` means the response is not ours.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        let tag = serde_json::from_str(map.get(REQUEST_KEY)?).ok()?;
        let mount = map.get(MOUNT_KEY)?.parse().ok()?;
        Some(Self { tag, mount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survives_the_host_round_trip() {
        let context = RequestContext {
            tag: RequestTag::SetStatus {
                application_id: "a1".to_string(),
                status: ApplicationStatus::Shortlisted,
            },
            mount: 7,
        };
        let map = context.to_map();
        assert!(map[REQUEST_KEY].contains("\"kind\":\"set_status\""));
        assert_eq!(RequestContext::from_map(&map), Some(context));
    }

    #[test]
    fn foreign_context_is_rejected() {
        let mut map = BTreeMap::new();
        map.insert("unrelated".to_string(), "1".to_string());
        assert_eq!(RequestContext::from_map(&map), None);
    }
}
