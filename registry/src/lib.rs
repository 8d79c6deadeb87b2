use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::{
    health::HealthCheckRepositoryImpl, permit::PermitRepositoryImpl,
    reservation::ReservationRepositoryImpl, space::SpaceRepositoryImpl,
};
use adapter::token::HmacPermitSigner;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::permit::PermitRepository;
use kernel::repository::reservation::ReservationRepository;
use kernel::repository::space::SpaceRepository;
use kernel::verifier::{PermitSigner, SignatureVerifier};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    space_repository: Arc<dyn SpaceRepository>,
    reservation_repository: Arc<dyn ReservationRepository>,
    permit_repository: Arc<dyn PermitRepository>,
    permit_signer: Arc<dyn PermitSigner>,
    signature_verifier: Arc<dyn SignatureVerifier>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let space_repository = Arc::new(SpaceRepositoryImpl::new(pool.clone()));
        let reservation_repository = Arc::new(ReservationRepositoryImpl::new(pool.clone()));
        let permit_repository = Arc::new(PermitRepositoryImpl::new(pool.clone()));
        // 署名と検証は同じ共有シークレットを使う
        let signer = Arc::new(HmacPermitSigner::new(app_config.permit.signing_secret));
        Self {
            health_check_repository,
            space_repository,
            reservation_repository,
            permit_repository,
            permit_signer: signer.clone(),
            signature_verifier: signer,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn space_repository(&self) -> Arc<dyn SpaceRepository> {
        self.space_repository.clone()
    }

    pub fn reservation_repository(&self) -> Arc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn permit_repository(&self) -> Arc<dyn PermitRepository> {
        self.permit_repository.clone()
    }

    pub fn permit_signer(&self) -> Arc<dyn PermitSigner> {
        self.permit_signer.clone()
    }

    pub fn signature_verifier(&self) -> Arc<dyn SignatureVerifier> {
        self.signature_verifier.clone()
    }
}
