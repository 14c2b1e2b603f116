use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::config::MatchingConfig;
use crate::workflows::matching::domain::{Gig, GigId, Platform, Profile, ProjectType};
use crate::workflows::matching::repository::{GigRepository, RepositoryError};
use crate::workflows::matching::{matching_router, GigMatchService};

pub(super) fn python_profile() -> Profile {
    Profile::new(["python", "django"], 50.0, 100.0).with_track_record(5.0, 0.9)
}

/// Fixed-price listing used throughout the scoring examples.
pub(super) fn django_gig() -> Gig {
    let mut gig = Gig::new("upwork_001", Platform::Upwork, "Django storefront");
    gig.skills_required = vec![
        "python".to_string(),
        "django".to_string(),
        "react".to_string(),
    ];
    gig.budget_max = Some(3200.0);
    gig.project_type = ProjectType::Fixed;
    gig.proposals_count = 8;
    gig.client_rating = 4.8;
    gig.client_reviews = 30;
    gig
}

pub(super) fn hourly_gig(id: &str, rate: f64, skills: &[&str]) -> Gig {
    let mut gig = Gig::new(id, Platform::Freelancer, format!("Hourly {id}"));
    gig.skills_required = skills.iter().map(|skill| skill.to_string()).collect();
    gig.budget_min = Some(rate * 0.8);
    gig.budget_max = Some(rate);
    gig.hourly_rate = Some(rate * 0.9);
    gig.project_type = ProjectType::Hourly;
    gig.proposals_count = 12;
    gig.client_rating = 4.5;
    gig.client_reviews = 12;
    gig
}

pub(super) fn corpus() -> Vec<Gig> {
    let mut weak = Gig::new("fiverr_001", Platform::Fiverr, "Logo refresh");
    weak.skills_required = vec!["figma".to_string()];
    weak.budget_min = Some(50.0);
    weak.budget_max = Some(150.0);
    weak.project_type = ProjectType::Fixed;
    weak.proposals_count = 45;
    weak.client_rating = 3.2;
    weak.client_reviews = 2;

    vec![
        django_gig(),
        hourly_gig("freelancer_001", 90.0, &["python", "aws"]),
        weak,
        hourly_gig("freelancer_002", 60.0, &["python", "django"]),
    ]
}

pub(super) fn matching_config() -> MatchingConfig {
    MatchingConfig {
        top_n: 3,
        fixed_price_hours: 40.0,
    }
}

pub(super) fn build_service() -> (GigMatchService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::with_gigs(corpus()));
    let service = GigMatchService::new(repository.clone(), &matching_config());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) gigs: Arc<Mutex<Vec<Gig>>>,
}

impl MemoryRepository {
    pub(super) fn with_gigs(gigs: Vec<Gig>) -> Self {
        Self {
            gigs: Arc::new(Mutex::new(gigs)),
        }
    }
}

impl GigRepository for MemoryRepository {
    fn list(&self) -> Result<Vec<Gig>, RepositoryError> {
        let guard = self.gigs.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }

    fn fetch(&self, id: &GigId) -> Result<Option<Gig>, RepositoryError> {
        let guard = self.gigs.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|gig| &gig.id == id).cloned())
    }
}

pub(super) struct UnavailableRepository;

impl GigRepository for UnavailableRepository {
    fn list(&self) -> Result<Vec<Gig>, RepositoryError> {
        Err(RepositoryError::Unavailable("gig store offline".to_string()))
    }

    fn fetch(&self, _id: &GigId) -> Result<Option<Gig>, RepositoryError> {
        Err(RepositoryError::Unavailable("gig store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn matching_router_with_service(
    service: GigMatchService<MemoryRepository>,
) -> axum::Router {
    matching_router(Arc::new(service))
}
