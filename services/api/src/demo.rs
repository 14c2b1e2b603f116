use crate::infra::{sample_gigs, InMemoryGigRepository};
use clap::Args;
use gig_scout::config::AppConfig;
use gig_scout::error::AppError;
use gig_scout::workflows::intake::GigImporter;
use gig_scout::workflows::market::{
    market_trends, ClientProfile, ClientSignals, MarketInsight,
};
use gig_scout::workflows::matching::{
    plan_bids, AutoBidPolicy, BidDraft, Gig, GigMatchService, NegotiationPlan, PriceQuote,
    Profile, ProposalDrafter, RankingReport,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Clone)]
pub(crate) struct ProfileArgs {
    /// Comma-separated skills, e.g. `python,django,aws`
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) skills: Vec<String>,
    /// Lowest acceptable hourly rate
    #[arg(long, default_value_t = Profile::DEFAULT_RATE_MIN)]
    pub(crate) rate_min: f64,
    /// Target hourly rate ceiling
    #[arg(long, default_value_t = Profile::DEFAULT_RATE_MAX)]
    pub(crate) rate_max: f64,
    #[arg(long, default_value_t = Profile::DEFAULT_YEARS)]
    pub(crate) years_experience: f64,
    /// Historical success rate as a fraction or a percentage
    #[arg(long, default_value_t = Profile::DEFAULT_SUCCESS_RATE)]
    pub(crate) success_rate: f64,
    /// Name used to sign drafted proposals
    #[arg(long)]
    pub(crate) name: Option<String>,
}

impl ProfileArgs {
    fn into_profile(self) -> Profile {
        let mut profile = Profile::new(self.skills, self.rate_min, self.rate_max)
            .with_track_record(self.years_experience, self.success_rate);
        profile.name = self.name.unwrap_or_default();
        profile
    }
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    #[command(flatten)]
    pub(crate) profile: ProfileArgs,
    /// CSV export of gigs to rank instead of the built-in catalogue
    #[arg(long)]
    pub(crate) gigs_csv: Option<PathBuf>,
    /// Number of recommendations to print (defaults to APP_TOP_N)
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct MarketArgs {
    /// Comma-separated skills to analyze
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) skills: Vec<String>,
    /// CSV export of gigs to analyze instead of the built-in catalogue
    #[arg(long)]
    pub(crate) gigs_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct NegotiateArgs {
    /// Hourly rate the client has offered
    #[arg(long)]
    pub(crate) current_rate: f64,
    /// Hourly rate to negotiate towards
    #[arg(long)]
    pub(crate) target_rate: f64,
    /// Justification point; repeat the flag for several
    #[arg(long = "point")]
    pub(crate) points: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of recommendations to show
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Skip the automated bidding portion of the demo.
    #[arg(long)]
    pub(crate) skip_bidding: bool,
}

fn load_gigs(path: Option<PathBuf>) -> Result<Vec<Gig>, AppError> {
    match path {
        Some(path) => Ok(GigImporter::from_path(path)?),
        None => Ok(sample_gigs()),
    }
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let gigs = load_gigs(args.gigs_csv)?;
    let profile = args.profile.into_profile();

    let service = GigMatchService::new(
        Arc::new(InMemoryGigRepository::with_gigs(gigs)),
        &config.matching,
    );
    let report = service.recommend(&profile, args.top_n)?;
    render_recommendations(&report);
    Ok(())
}

pub(crate) fn run_market_report(args: MarketArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let gigs = load_gigs(args.gigs_csv)?;
    let insights = market_trends(args.skills.as_slice(), &gigs, config.matching.fixed_price_hours);
    render_market(&insights);
    Ok(())
}

pub(crate) fn run_negotiate(args: NegotiateArgs) -> Result<(), AppError> {
    render_negotiation(&NegotiationPlan::new(
        args.current_rate,
        args.target_rate,
        args.points,
    ));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let profile = demo_profile();
    let service = GigMatchService::new(
        Arc::new(InMemoryGigRepository::seeded()),
        &config.matching,
    );

    println!("Gig Scout demo");
    println!(
        "Profile: {} | {} | ${:.0}-${:.0}/hr | {:.0} years | {:.0}% success",
        profile.name,
        profile.skills.join(", "),
        profile.rate_min,
        profile.rate_max,
        profile.years_experience,
        profile.historical_success_rate * 100.0
    );

    let report = service.recommend(&profile, args.top_n)?;
    render_recommendations(&report);

    if let Some(top) = report.recommendations.first() {
        let quote = service.price(&top.gig_id, &profile)?;
        println!("\nPricing for {}", top.gig_id);
        render_quote(&quote);
    }

    println!();
    render_negotiation(&demo_negotiation(&profile));

    println!();
    render_market(&service.market(&profile.skills)?);

    let client = service.research_client(&ClientSignals {
        client_id: Some("demo-client".to_string()),
        rating: Some(4.6),
        reviews: 18,
        total_spent: 12_500.0,
        total_projects: 14,
    });
    println!();
    render_client(&client);

    if args.skip_bidding {
        return Ok(());
    }

    let policy = AutoBidPolicy {
        enabled: true,
        min_budget: 300.0,
        ..AutoBidPolicy::default()
    };
    let bids = plan_bids(
        service.ranker(),
        &ProposalDrafter::template_only(),
        &profile,
        &sample_gigs(),
        &policy,
        0,
    );
    println!();
    render_bids(&bids);
    Ok(())
}

fn demo_profile() -> Profile {
    let mut profile = Profile::new(
        ["Python", "Machine Learning", "AWS", "React", "TypeScript"],
        50.0,
        120.0,
    )
    .with_track_record(6.0, 0.9);
    profile.name = "Jordan Lee".to_string();
    profile
}

/// Counter-offer from the profile's floor rate up to the middle of its range.
fn demo_negotiation(profile: &Profile) -> NegotiationPlan {
    let target = (profile.rate_min + profile.rate_max) / 2.0;
    NegotiationPlan::new(
        profile.rate_min,
        target,
        vec![
            format!("{:.0} years shipping production systems", profile.years_experience),
            format!(
                "{:.0}% of past contracts rated successful",
                profile.historical_success_rate * 100.0
            ),
        ],
    )
}

fn render_recommendations(report: &RankingReport) {
    println!(
        "\nTop {} of {} gigs evaluated",
        report.recommendations.len(),
        report.evaluated
    );

    for (position, recommendation) in report.recommendations.iter().enumerate() {
        let scores = &recommendation.scores;
        println!(
            "{}. [{}] {} ({})",
            position + 1,
            recommendation.platform,
            recommendation.title,
            recommendation.gig_id
        );
        println!(
            "   score {:.3} | skill {:.0}% | rate {:.0}% | client {:.0}% | win {:.0}% | bid ${:.2} | risk {}",
            scores.recommendation_score,
            scores.skill_match * 100.0,
            scores.rate_match * 100.0,
            scores.client_quality * 100.0,
            scores.win_probability * 100.0,
            scores.optimal_bid,
            recommendation.risk_level.label()
        );
        for reason in &recommendation.reasoning {
            println!("   - {reason}");
        }
        println!("   Approach: {}", recommendation.suggested_approach);
    }

    if !report.skipped.is_empty() {
        println!("Skipped {} record(s):", report.skipped.len());
        for skipped in &report.skipped {
            let id = skipped
                .gig_id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_else(|| format!("row {}", skipped.index));
            println!("  - {id}: {}", skipped.reason);
        }
    }
}

fn render_quote(quote: &PriceQuote) {
    println!(
        "- optimal ${:.2} | conservative ${:.2} | aggressive ${:.2}",
        quote.optimal_price, quote.conservative_price, quote.aggressive_price
    );
    println!(
        "- {} (competition {}, confidence {:?})",
        quote.strategy_note,
        quote.factors.competition_level.label(),
        quote.confidence
    );
}

fn render_negotiation(plan: &NegotiationPlan) {
    println!(
        "Negotiation: ${:.2}/hr -> ${:.2}/hr (+{:.1}%)",
        plan.current_rate, plan.target_rate, plan.rate_increase_percent
    );
    println!(
        "- {} | outlook {}",
        plan.strategy.description(),
        plan.success_outlook
    );
    for point in &plan.justification_points {
        println!("  * {point}");
    }
    for alternative in &plan.alternatives {
        println!("  ~ {alternative}");
    }
}

fn render_market(insights: &[MarketInsight]) {
    println!("Market snapshot");
    for insight in insights {
        if insight.is_unknown() {
            println!("- {}: {}", insight.skill, insight.recommended_action);
            continue;
        }
        let platforms: Vec<&str> = insight
            .top_platforms
            .iter()
            .map(|platform| platform.label())
            .collect();
        println!(
            "- {}: {} gigs | demand {:.2} | avg ${:.2}/hr | {} competition | {}",
            insight.skill,
            insight.matching_gigs,
            insight.demand_score,
            insight.average_rate,
            insight.competition_level.label(),
            platforms.join(", ")
        );
        println!("  {}", insight.recommended_action);
    }
}

fn render_client(client: &ClientProfile) {
    println!(
        "Client research ({}): quality {:.2}",
        client.client_id.as_deref().unwrap_or("anonymous"),
        client.quality_score
    );
    for flag in &client.green_flags {
        println!("  + {flag}");
    }
    for flag in &client.red_flags {
        println!("  ! {flag}");
    }
    println!("  {}", client.recommendation);
}

fn render_bids(bids: &[BidDraft]) {
    if bids.is_empty() {
        println!("No gigs cleared the automated bidding policy");
        return;
    }

    println!("Bid plan ({} drafts)", bids.len());
    for bid in bids {
        println!(
            "- {} on {}: ${:.2} (score {:.3}, win {:.0}%)",
            bid.gig_title,
            bid.platform,
            bid.bid_amount,
            bid.recommendation_score,
            bid.win_probability * 100.0
        );
    }
}
