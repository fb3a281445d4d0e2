use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Utc, Weekday};
use rand::{seq::SliceRandom, Rng};
use tracing::info;

use crate::{
    db::DailyStore,
    error::ApiError,
    models::{
        daily::DailyState,
        plan::{DishSource, PlanDay, TodaysDish, WeeklyPlan},
        schedule::day_key,
    },
    services::daily::mutate,
};

/// Days that get dishes in a generated plan, in assignment order. Monday is the rest day.
pub const PLAN_DAYS: [Weekday; 6] = [
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Assigns two dishes to every plan day from a shuffled copy of `pool`.
///
/// Day `i` gets `shuffled[i]` and `shuffled[i + 1]` (modulo pool size),
/// skipping to `shuffled[i + 2]` when the second would repeat the first.
pub fn generate<R: Rng + ?Sized>(
    pool: &[String],
    rng: &mut R,
) -> Result<BTreeMap<String, PlanDay>, ApiError> {
    if pool.is_empty() {
        return Err(ApiError::bad_request("Keine Gerichte für den Wochenplan vorhanden"));
    }

    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    let n = shuffled.len();

    let days = PLAN_DAYS
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let dish1 = shuffled[i % n].clone();
            let mut dish2 = shuffled[(i + 1) % n].clone();
            if dish2 == dish1 {
                dish2 = shuffled[(i + 2) % n].clone();
            }
            (day_key(*day).to_string(), PlanDay { dish1, dish2 })
        })
        .collect();
    Ok(days)
}

/// The dish of the day: rest day, plan entry, or the manually set special.
pub fn todays_dish(state: &DailyState, today: Weekday) -> TodaysDish {
    let plan = &state.weekly_plan;
    let day = day_key(today);

    if plan.active && today == Weekday::Mon {
        return TodaysDish {
            source: DishSource::RestDay,
            day,
            dish1: String::new(),
            dish2: String::new(),
            rest_day: true,
        };
    }

    if plan.active {
        if let Some(entry) = plan.days.get(day).filter(|e| !e.dish1.is_empty()) {
            return TodaysDish {
                source: DishSource::Plan,
                day,
                dish1: entry.dish1.clone(),
                dish2: entry.dish2.clone(),
                rest_day: false,
            };
        }
    }

    TodaysDish {
        source: DishSource::Manual,
        day,
        dish1: state.todays_special.dish1.clone(),
        dish2: state.todays_special.dish2.clone(),
        rest_day: false,
    }
}

pub struct PlanService;

impl PlanService {
    pub fn generate_random<R: Rng + ?Sized>(
        store: &dyn DailyStore,
        rng: &mut R,
        now: DateTime<FixedOffset>,
    ) -> Result<WeeklyPlan, ApiError> {
        let plan = mutate(store, |state| {
            let days = generate(&state.dishes(), rng)?;
            state.weekly_plan = WeeklyPlan {
                active: true,
                days,
                updated_at: Some(now.with_timezone(&Utc)),
            };
            Ok(state.weekly_plan.clone())
        })?;
        info!("Weekly plan generated for {} day(s)", plan.days.len());
        Ok(plan)
    }

    pub fn set_manual(
        store: &dyn DailyStore,
        days: BTreeMap<String, PlanDay>,
        now: DateTime<FixedOffset>,
    ) -> Result<WeeklyPlan, ApiError> {
        let plan = mutate(store, |state| {
            state.weekly_plan = WeeklyPlan {
                active: true,
                days,
                updated_at: Some(now.with_timezone(&Utc)),
            };
            Ok(state.weekly_plan.clone())
        })?;
        info!("Weekly plan set manually for {} day(s)", plan.days.len());
        Ok(plan)
    }

    /// Overwrites one day of the plan. The day name is lower-cased but not
    /// checked against the weekdays.
    pub fn set_day(
        store: &dyn DailyStore,
        day: &str,
        dish1: &str,
        dish2: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<WeeklyPlan, ApiError> {
        let key = day.trim().to_lowercase();
        if key.is_empty() {
            return Err(ApiError::bad_request("day fehlt"));
        }
        let plan = mutate(store, |state| {
            state.weekly_plan.days.insert(
                key.clone(),
                PlanDay {
                    dish1: dish1.to_string(),
                    dish2: dish2.to_string(),
                },
            );
            state.weekly_plan.updated_at = Some(now.with_timezone(&Utc));
            Ok(state.weekly_plan.clone())
        })?;
        info!("Weekly plan entry for {} updated", key);
        Ok(plan)
    }

    /// Switches the plan off, keeping its days for later reactivation.
    pub fn deactivate(
        store: &dyn DailyStore,
        now: DateTime<FixedOffset>,
    ) -> Result<WeeklyPlan, ApiError> {
        let plan = mutate(store, |state| {
            state.weekly_plan.active = false;
            state.weekly_plan.updated_at = Some(now.with_timezone(&Utc));
            Ok(state.weekly_plan.clone())
        })?;
        info!("Weekly plan deactivated");
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::db::{read_state, MemoryStore};

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 16, 9, 0, 0)
            .unwrap()
    }

    fn pool(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn two_dish_pool_never_repeats_within_a_day() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let days = generate(&pool(&["A", "B"]), &mut rng).unwrap();
            assert_eq!(days.len(), 6);
            assert!(!days.contains_key("monday"));
            for entry in days.values() {
                assert_ne!(entry.dish1, entry.dish2);
            }
        }
    }

    #[test]
    fn dishes_follow_the_shuffled_order() {
        let dishes = pool(&["A", "B", "C", "D", "E", "F"]);
        let mut shuffled = dishes.clone();
        shuffled.shuffle(&mut StdRng::seed_from_u64(7));

        let days = generate(&dishes, &mut StdRng::seed_from_u64(7)).unwrap();
        for (i, day) in PLAN_DAYS.iter().enumerate() {
            let entry = &days[day_key(*day)];
            assert_eq!(entry.dish1, shuffled[i]);
            assert_eq!(entry.dish2, shuffled[(i + 1) % 6]);
        }
    }

    #[test]
    fn duplicate_neighbour_is_skipped() {
        // Every permutation of this pool has the two "A"s somewhere; whichever
        // day lands on them must fall through to the next dish.
        let dishes = pool(&["A", "A", "B"]);
        for seed in 0..20 {
            let days = generate(&dishes, &mut StdRng::seed_from_u64(seed)).unwrap();
            for entry in days.values() {
                assert_ne!(entry.dish1, entry.dish2);
            }
        }
    }

    #[test]
    fn single_dish_pool_repeats_the_dish() {
        let days = generate(&pool(&["Soljanka"]), &mut StdRng::seed_from_u64(1)).unwrap();
        for entry in days.values() {
            assert_eq!(entry.dish1, "Soljanka");
            assert_eq!(entry.dish2, "Soljanka");
        }
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = generate(&[], &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn random_plan_uses_default_pool_and_activates() {
        let store = MemoryStore::new();
        let plan =
            PlanService::generate_random(&store, &mut StdRng::seed_from_u64(3), now()).unwrap();
        assert!(plan.active);
        assert_eq!(plan.days.len(), 6);
        assert_eq!(read_state(&store).weekly_plan, plan);
    }

    #[test]
    fn day_edit_lower_cases_without_validating() {
        let store = MemoryStore::new();
        PlanService::set_day(&store, "Freitag", "Senfeier", "Tote Oma", now()).unwrap();
        let plan = PlanService::set_day(&store, "FRIDAY", "Kesselgulasch", "", now()).unwrap();
        assert_eq!(plan.days["freitag"].dish1, "Senfeier");
        assert_eq!(plan.days["friday"].dish1, "Kesselgulasch");
        assert!(!plan.active);
    }

    #[test]
    fn day_edit_without_day_writes_nothing() {
        let store = MemoryStore::new();
        let err = PlanService::set_day(&store, "  ", "Senfeier", "", now()).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert!(store.raw().unwrap().is_none());
    }

    #[test]
    fn deactivate_keeps_days() {
        let store = MemoryStore::new();
        PlanService::generate_random(&store, &mut StdRng::seed_from_u64(9), now()).unwrap();
        let plan = PlanService::deactivate(&store, now()).unwrap();
        assert!(!plan.active);
        assert_eq!(plan.days.len(), 6);
    }

    #[test]
    fn todays_dish_prefers_active_plan() {
        let mut state = DailyState::default();
        state.todays_special.dish1 = "Currywurst".into();
        state.weekly_plan.days.insert(
            "friday".into(),
            PlanDay {
                dish1: "Soljanka".into(),
                dish2: "Senfeier".into(),
            },
        );

        let dish = todays_dish(&state, Weekday::Fri);
        assert_eq!(dish.source, DishSource::Manual);
        assert_eq!(dish.dish1, "Currywurst");

        state.weekly_plan.active = true;
        let dish = todays_dish(&state, Weekday::Fri);
        assert_eq!(dish.source, DishSource::Plan);
        assert_eq!(dish.dish2, "Senfeier");

        let dish = todays_dish(&state, Weekday::Sat);
        assert_eq!(dish.source, DishSource::Manual);

        let dish = todays_dish(&state, Weekday::Mon);
        assert_eq!(dish.source, DishSource::RestDay);
        assert!(dish.rest_day);
    }
}
