//! End-to-end tests across the pipeline:
//! calendar → normalize → layout → render plan, plus interaction.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use terrain_core::{
    ColorBand, ContributionCalendar, ContributionDay, ContributionWeek, Interaction,
    InteractionState, LayoutOptions, PointerEvent, RenderPlan, generate_calendar, layout,
    mock_user, normalize, plan,
};

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
}

fn calendar_from_counts(weeks: &[Vec<u32>]) -> ContributionCalendar {
    let weeks = weeks
        .iter()
        .enumerate()
        .map(|(w, counts)| ContributionWeek {
            contribution_days: counts
                .iter()
                .enumerate()
                .map(|(d, &c)| {
                    ContributionDay::new(sunday() + Duration::days((w * 7 + d) as i64), c)
                })
                .collect(),
        })
        .collect();
    ContributionCalendar::from_weeks(weeks)
}

/// One week, day 3 = 5 contributions, everything else zero.
#[test]
fn single_busy_day_yields_one_point() {
    let cal = calendar_from_counts(&[vec![0, 0, 0, 5, 0, 0, 0]]);
    let points = normalize(&cal);
    assert_eq!(points.len(), 1);
    let p = &points[0];
    assert_eq!((p.x, p.y, p.z), (0, 3, 5));
    assert_eq!(p.color, ColorBand::from_count(5));

    let out = layout(&points, LayoutOptions::default());
    let terrain = out.terrain().expect("non-empty terrain");
    assert_eq!(terrain.len(), 1);
    assert_eq!(terrain.offset, (-0.5, -2.0));
}

/// An all-zero calendar normalizes to nothing and renders nothing.
#[test]
fn all_zero_calendar_reports_no_data() {
    let cal = calendar_from_counts(&vec![vec![0; 7]; 52]);
    let points = normalize(&cal);
    assert!(points.is_empty());

    let out = layout(&points, LayoutOptions::default());
    assert!(out.is_no_data());
    assert!(plan(&out, InteractionState::Idle, false).is_none());
}

/// Normalizing the same 52-week year twice gives list-equal output.
#[test]
fn normalize_is_deterministic() {
    let cal = generate_calendar(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), &mut rng());
    let a = normalize(&cal);
    let b = normalize(&cal);
    assert_eq!(a.len(), b.len());
    assert_eq!(a, b);
}

/// Hover P, click P, then hover Q: the selection of P survives.
#[test]
fn selection_survives_hover_elsewhere() {
    let user = mock_user("octocat", &mut rng());
    let points = normalize(user.calendar());
    assert!(points.len() >= 2);
    let out = layout(&points, LayoutOptions::default());
    let terrain = out.terrain().unwrap();

    let (p, q) = (0, 1);
    let mut interaction = Interaction::new(terrain.len());
    assert_eq!(interaction.dispatch(PointerEvent::Enter(p)), InteractionState::Hovering(p));
    assert_eq!(interaction.dispatch(PointerEvent::Click(p)), InteractionState::Selected(p));
    assert_eq!(interaction.dispatch(PointerEvent::Enter(q)), InteractionState::Selected(p));

    let Some(RenderPlan::Mesh(draws)) = plan(&out, interaction.state(), false) else {
        panic!("a year of mock data stays under the instancing threshold");
    };
    assert!(draws[p].emissive > draws[q].emissive);

    assert_eq!(interaction.dispatch(PointerEvent::Close), InteractionState::Idle);
}

#[test]
fn mock_total_matches_day_sum() {
    for seed in 0..10 {
        let user = mock_user("octocat", &mut SmallRng::seed_from_u64(seed));
        let cal = user.calendar();
        let sum: u64 = cal.days().map(|d| u64::from(d.contribution_count)).sum();
        assert_eq!(sum, cal.total_contributions);
    }
}

#[test]
fn dense_calendar_switches_to_instanced() {
    // Two years of every-day activity: 728 points.
    let cal = calendar_from_counts(&vec![vec![3; 7]; 104]);
    let points = normalize(&cal);
    assert_eq!(points.len(), 728);
    let out = layout(&points, LayoutOptions::default());
    assert!(matches!(
        plan(&out, InteractionState::Idle, false),
        Some(RenderPlan::Instanced(_))
    ));
}

proptest! {
    #[test]
    fn one_point_per_nonzero_day(weeks in prop::collection::vec(prop::collection::vec(0u32..30, 7), 0..53)) {
        let cal = calendar_from_counts(&weeks);
        let points = normalize(&cal);
        let nonzero = cal.days().filter(|d| d.contribution_count > 0).count();
        prop_assert_eq!(points.len(), nonzero);
        prop_assert!(points.len() <= cal.day_count());
        prop_assert!(points.iter().all(|p| p.z > 0 && p.color == ColorBand::from_count(p.z)));
    }

    #[test]
    fn points_point_back_at_their_day(weeks in prop::collection::vec(prop::collection::vec(0u32..30, 7), 1..53)) {
        let cal = calendar_from_counts(&weeks);
        for p in normalize(&cal) {
            let day = &cal.weeks[p.x as usize].contribution_days[p.y as usize];
            prop_assert_eq!(day.date, p.date);
            prop_assert_eq!(day.contribution_count, p.z);
        }
    }

    #[test]
    fn centering_matches_bounds(weeks in prop::collection::vec(prop::collection::vec(0u32..30, 7), 1..53)) {
        let cal = calendar_from_counts(&weeks);
        let points = normalize(&cal);
        prop_assume!(!points.is_empty());
        let max_x = points.iter().map(|p| p.x).max().unwrap() as f32;
        let max_y = points.iter().map(|p| p.y).max().unwrap() as f32;
        let (ox, oz) = terrain_core::centering_offset(&points);
        prop_assert!((ox + (max_x + 1.0) / 2.0).abs() < 1e-6);
        prop_assert!((oz + (max_y + 1.0) / 2.0).abs() < 1e-6);
    }
}
