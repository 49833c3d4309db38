use tonic::transport::Channel;
use uuid::Uuid;

use elaview_proto::profile::{GetProfileRequest, profile_service_client::ProfileServiceClient};

use crate::domain::repository::ProfilePort;
use crate::domain::types::ProfileSnapshot;
use crate::error::AuthServiceError;

/// gRPC client implementing `ProfilePort` via `elaview.profile.ProfileService`.
#[derive(Clone)]
pub struct GrpcProfilePort {
    client: ProfileServiceClient<Channel>,
}

impl GrpcProfilePort {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: ProfileServiceClient::new(channel),
        }
    }
}

impl ProfilePort for GrpcProfilePort {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProfileSnapshot>, AuthServiceError> {
        let response = self
            .client
            .clone()
            .get_profile(GetProfileRequest {
                user_id: id.to_string(),
            })
            .await;
        match response {
            Ok(resp) => Ok(Some(resp.into_inner().try_into()?)),
            // NOT_FOUND means the profile has not been completed yet.
            Err(status) if status.code() == tonic::Code::NotFound => Ok(None),
            Err(e) => Err(anyhow::anyhow!("gRPC get_profile failed: {e}").into()),
        }
    }
}

impl TryFrom<elaview_proto::profile::Profile> for ProfileSnapshot {
    type Error = AuthServiceError;

    fn try_from(profile: elaview_proto::profile::Profile) -> Result<Self, Self::Error> {
        let id = profile
            .id
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid UUID from marketplace service"))?;
        let role = u8::try_from(profile.role)
            .map_err(|_| anyhow::anyhow!("role out of u8 range: {}", profile.role))?;
        Ok(ProfileSnapshot {
            id,
            role,
            is_active: profile.is_active,
        })
    }
}
