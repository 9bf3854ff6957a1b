use rand::Rng;
use time::{Date, Month, OffsetDateTime};

use crate::entities::EmployeeDraft;
use crate::utils::date_format;

const FIRST_NAMES: [&str; 10] = [
    "John", "Jane", "Michael", "Sarah", "David", "Lisa", "Robert", "Emma", "William", "Olivia",
];

const LAST_NAMES: [&str; 10] = [
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez",
];

const POSITIONS: [&str; 5] = [
    "Software Engineer",
    "Product Manager",
    "UX Designer",
    "QA Engineer",
    "DevOps Engineer",
];

const DEPARTMENTS: [&str; 5] = ["Engineering", "Product", "Design", "QA", "Operations"];

/// Earliest generated hire date.
const FIRST_HIRE: (i32, Month, u8) = (2020, Month::January, 1);

/// Generates the `index`-th synthetic employee.
///
/// Names, positions and departments cycle with `index`; the phone number and hire
/// date (between 2020-01-01 and `today`) are random.
pub fn generate<R: Rng + ?Sized>(index: usize, today: Date, rng: &mut R) -> EmployeeDraft {
    let first_name = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last_name = LAST_NAMES[index % LAST_NAMES.len()];

    EmployeeDraft {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        position: POSITIONS[index % POSITIONS.len()].to_string(),
        department: DEPARTMENTS[index % DEPARTMENTS.len()].to_string(),
        phone_number: format!(
            "{}-{}-{}",
            rng.gen_range(100..1000),
            rng.gen_range(100..1000),
            rng.gen_range(1000..10000)
        ),
        hire_date: random_hire_date(today, rng),
    }
}

/// Generates `count` synthetic employees using the thread-local RNG.
pub fn generate_many(count: usize) -> Vec<EmployeeDraft> {
    let today = OffsetDateTime::now_utc().date();
    let mut rng = rand::thread_rng();
    (0..count).map(|i| generate(i, today, &mut rng)).collect()
}

fn random_hire_date<R: Rng + ?Sized>(today: Date, rng: &mut R) -> String {
    let (year, month, day) = FIRST_HIRE;
    let start = Date::from_calendar_date(year, month, day)
        .map_or(today.to_julian_day(), Date::to_julian_day);
    let end = today.to_julian_day().max(start);
    let date = Date::from_julian_day(rng.gen_range(start..=end)).unwrap_or(today);
    date_format::format_iso_date(date).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date_format::parse_iso_date;
    use rand::{SeedableRng, rngs::StdRng};
    use time::macros::date;

    #[test]
    fn attributes_cycle_with_index() {
        let mut rng = StdRng::seed_from_u64(7);
        let today = date!(2024 - 06 - 30);

        let first = generate(0, today, &mut rng);
        assert_eq!(first.first_name, "John");
        assert_eq!(first.last_name, "Smith");
        assert_eq!(first.email, "john.smith@example.com");
        assert_eq!(first.position, "Software Engineer");
        assert_eq!(first.department, "Engineering");

        let sixth = generate(5, today, &mut rng);
        assert_eq!(sixth.first_name, "Lisa");
        assert_eq!(sixth.last_name, "Garcia");
        assert_eq!(sixth.position, "Software Engineer");
        assert_eq!(sixth.department, "Engineering");
        assert_eq!(generate(11, today, &mut rng).email, "jane.johnson@example.com");
    }

    #[test]
    fn random_attributes_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(42);
        let today = date!(2024 - 06 - 30);
        for index in 0..50 {
            let draft = generate(index, today, &mut rng);
            assert!(draft.missing_fields().is_empty());

            let parts: Vec<&str> = draft.phone_number.split('-').collect();
            assert_eq!(parts.iter().map(|p| p.len()).collect::<Vec<_>>(), vec![3, 3, 4]);

            let hired = parse_iso_date(&draft.hire_date).unwrap();
            assert!(hired >= date!(2020 - 01 - 01) && hired <= today);
        }
    }

    #[test]
    fn generate_many_produces_requested_count() {
        assert_eq!(generate_many(10).len(), 10);
        assert!(generate_many(0).is_empty());
    }
}
