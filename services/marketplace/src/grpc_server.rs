use tonic::{Request, Response, Status};
use uuid::Uuid;

use elaview_proto::profile::{GetProfileRequest, Profile, profile_service_server::ProfileService};

use crate::state::AppState;
use crate::usecase::profile::GetProfileUseCase;

#[derive(Clone)]
pub struct MarketplaceGrpcServer {
    pub state: AppState,
}

#[tonic::async_trait]
impl ProfileService for MarketplaceGrpcServer {
    async fn get_profile(
        &self,
        request: Request<GetProfileRequest>,
    ) -> Result<Response<Profile>, Status> {
        let user_id = request
            .into_inner()
            .user_id
            .parse::<Uuid>()
            .map_err(|_| Status::invalid_argument("invalid user_id"))?;

        // The auth service needs deactivated profiles too (it decides what to
        // do with `is_active`), so this is the unfiltered lookup.
        let uc = GetProfileUseCase {
            repo: self.state.profile_repo(),
        };
        let profile = uc
            .execute(user_id)
            .await
            .map_err(|e| Status::not_found(e.to_string()))?;

        Ok(Response::new(Profile {
            id: profile.id.to_string(),
            role: profile.role as u32,
            is_active: profile.is_active,
        }))
    }
}
