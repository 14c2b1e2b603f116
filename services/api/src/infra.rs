use gig_scout::workflows::matching::{
    Gig, GigId, GigRepository, Platform, ProjectType, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local gig store seeded with a demonstration catalogue.
#[derive(Default, Clone)]
pub(crate) struct InMemoryGigRepository {
    gigs: Arc<Mutex<Vec<Gig>>>,
}

impl InMemoryGigRepository {
    pub(crate) fn with_gigs(gigs: Vec<Gig>) -> Self {
        Self {
            gigs: Arc::new(Mutex::new(gigs)),
        }
    }

    pub(crate) fn seeded() -> Self {
        Self::with_gigs(sample_gigs())
    }

    fn snapshot(&self) -> Result<Vec<Gig>, RepositoryError> {
        self.gigs
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| RepositoryError::Unavailable("gig store lock poisoned".to_string()))
    }
}

impl GigRepository for InMemoryGigRepository {
    fn list(&self) -> Result<Vec<Gig>, RepositoryError> {
        self.snapshot()
    }

    fn fetch(&self, id: &GigId) -> Result<Option<Gig>, RepositoryError> {
        Ok(self.snapshot()?.into_iter().find(|gig| &gig.id == id))
    }
}

struct SampleGig {
    id: &'static str,
    platform: Platform,
    title: &'static str,
    description: &'static str,
    budget: (Option<f64>, Option<f64>),
    hourly_rate: Option<f64>,
    project_type: ProjectType,
    skills: &'static [&'static str],
    client: (f64, u32),
    proposals: u32,
    url: &'static str,
}

impl SampleGig {
    fn build(self) -> Gig {
        let mut gig = Gig::new(self.id, self.platform, self.title);
        gig.description = self.description.to_string();
        gig.budget_min = self.budget.0;
        gig.budget_max = self.budget.1;
        gig.hourly_rate = self.hourly_rate;
        gig.project_type = self.project_type;
        gig.skills_required = self.skills.iter().map(|skill| skill.to_string()).collect();
        gig.client_rating = self.client.0;
        gig.client_reviews = self.client.1;
        gig.proposals_count = self.proposals;
        gig.url = Some(self.url.to_string());
        gig
    }
}

pub(crate) fn sample_gigs() -> Vec<Gig> {
    vec![
        SampleGig {
            id: "upwork_001",
            platform: Platform::Upwork,
            title: "React Developer Needed for E-commerce Site",
            description: "Build a modern e-commerce storefront with Redux, TypeScript, and payment integration.",
            budget: (Some(800.0), Some(1500.0)),
            hourly_rate: None,
            project_type: ProjectType::Fixed,
            skills: &["React", "TypeScript", "Redux", "JavaScript", "CSS"],
            client: (4.8, 23),
            proposals: 12,
            url: "https://www.upwork.com/jobs/~001",
        },
        SampleGig {
            id: "upwork_002",
            platform: Platform::Upwork,
            title: "Machine Learning Engineer for Recommendation System",
            description: "Build a collaborative-filtering recommendation engine on AWS with TensorFlow or PyTorch.",
            budget: (Some(3000.0), Some(6000.0)),
            hourly_rate: None,
            project_type: ProjectType::Fixed,
            skills: &["Machine Learning", "Python", "TensorFlow", "PyTorch", "AWS"],
            client: (4.9, 45),
            proposals: 8,
            url: "https://www.upwork.com/jobs/~002",
        },
        SampleGig {
            id: "upwork_003",
            platform: Platform::Upwork,
            title: "Senior DevOps Engineer for Cloud Migration",
            description: "Lead an on-prem to AWS migration using Docker, Kubernetes, Terraform, and CI/CD.",
            budget: (None, None),
            hourly_rate: Some(75.0),
            project_type: ProjectType::Hourly,
            skills: &["DevOps", "AWS", "Docker", "Kubernetes", "Terraform", "CI/CD"],
            client: (5.0, 67),
            proposals: 5,
            url: "https://www.upwork.com/jobs/~003",
        },
        SampleGig {
            id: "fiverr_001",
            platform: Platform::Fiverr,
            title: "Python Automation Script Development",
            description: "Automate CSV data processing and generate weekly reports.",
            budget: (Some(200.0), Some(400.0)),
            hourly_rate: Some(25.0),
            project_type: ProjectType::Fixed,
            skills: &["Python", "Data Processing", "CSV", "Automation"],
            client: (4.5, 8),
            proposals: 7,
            url: "https://www.fiverr.com/gigs/001",
        },
        SampleGig {
            id: "fiverr_002",
            platform: Platform::Fiverr,
            title: "Mobile App UI/UX Design - iOS & Android",
            description: "Design a fitness tracking app interface in Figma.",
            budget: (Some(500.0), Some(900.0)),
            hourly_rate: None,
            project_type: ProjectType::Fixed,
            skills: &["UI/UX Design", "Figma", "Mobile Design", "iOS", "Android"],
            client: (4.7, 34),
            proposals: 15,
            url: "https://www.fiverr.com/gigs/002",
        },
        SampleGig {
            id: "fiverr_003",
            platform: Platform::Fiverr,
            title: "Node.js REST API Development",
            description: "Build an Express.js API backed by MongoDB with authentication and documentation.",
            budget: (Some(600.0), Some(1000.0)),
            hourly_rate: None,
            project_type: ProjectType::Fixed,
            skills: &["Node.js", "Express.js", "MongoDB", "REST API", "Authentication"],
            client: (4.6, 19),
            proposals: 11,
            url: "https://www.fiverr.com/gigs/003",
        },
        SampleGig {
            id: "freelancer_001",
            platform: Platform::Freelancer,
            title: "WordPress Website Debugging and Optimization",
            description: "Debug an existing WordPress site and tune PHP and MySQL performance.",
            budget: (Some(300.0), Some(600.0)),
            hourly_rate: Some(30.0),
            project_type: ProjectType::Hourly,
            skills: &["WordPress", "PHP", "MySQL", "Performance Optimization"],
            client: (4.2, 15),
            proposals: 18,
            url: "https://www.freelancer.com/projects/001",
        },
        SampleGig {
            id: "freelancer_002",
            platform: Platform::Freelancer,
            title: "Data Analyst for Business Intelligence Dashboard",
            description: "Create an interactive PowerBI or Tableau dashboard over SQL sources.",
            budget: (Some(1200.0), Some(2000.0)),
            hourly_rate: None,
            project_type: ProjectType::Fixed,
            skills: &["Data Analysis", "SQL", "PowerBI", "Tableau", "Data Visualization"],
            client: (4.4, 28),
            proposals: 14,
            url: "https://www.freelancer.com/projects/002",
        },
    ]
    .into_iter()
    .map(SampleGig::build)
    .collect()
}
