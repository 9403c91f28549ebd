/// Test data generator for SUIN Recommender
///
/// Generates a CSV file of random package lockers with the full attribute
/// set of the locker dataset. Rows map onto `Record` through
/// `AttributeRows`, so the file can be fed straight into the recommender.
///
/// Run: cargo run --bin generate-test-data -- [rows] [file]

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use suin_recommender::services::dataset::{
    ATTR_ACCESSIBLE, ATTR_LATITUDE, ATTR_LONGITUDE, ATTR_PARKING, ATTR_TYPE,
};

const DEFAULT_ROWS: usize = 50_000;
const DEFAULT_FILE: &str = "suinGeneratedData.csv";

const ATTR_USER_DISTANCE: &str = "Oddaljenost_uporabnika_od_paketnika_(km)";
const ATTR_CAPACITY: &str = "Kapaciteta_paketnika";
const ATTR_OPENING_HOURS: &str = "Dostopnost_paketnika";
const ATTR_OCCUPANCY: &str = "Zasedenost_paketnika (%)";
const ATTR_SECURITY: &str = "Varnost_paketnika";
const ATTR_RATING: &str = "Ocena_uporabnikov";
const ATTR_WEATHER: &str = "Zascita_pred_vremenskimi_vplivi";
const ATTR_CONDITION: &str = "Stanje_paketnika";

/// Column order of the generated file
const HEADER: [&str; 13] = [
    ATTR_USER_DISTANCE,
    ATTR_CAPACITY,
    ATTR_TYPE,
    ATTR_OPENING_HOURS,
    ATTR_OCCUPANCY,
    ATTR_SECURITY,
    ATTR_ACCESSIBLE,
    ATTR_RATING,
    ATTR_WEATHER,
    ATTR_PARKING,
    ATTR_CONDITION,
    ATTR_LATITUDE,
    ATTR_LONGITUDE,
];

const LOCKER_TYPES: &[&str] = &["navadni", "hlajen", "suhi"];
const OPENING_HOURS: &[&str] = &["24/7", "delovni_cas"];
const WEATHER_PROTECTION: &[&str] = &["pod_streho", "v_zaprtem_prostoru", "na_prostem"];
const CONDITIONS: &[&str] = &["deluje_pravilno", "v_okvari"];
const YES_NO: &[&str] = &["da", "ne"];

struct LockerRow {
    user_distance_km: f64,
    capacity: u8,
    locker_type: &'static str,
    opening_hours: &'static str,
    occupancy_pct: f64,
    secure: &'static str,
    accessible: &'static str,
    rating: f64,
    weather_protection: &'static str,
    parking: &'static str,
    condition: &'static str,
    latitude: f64,
    longitude: f64,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn pick<R: Rng>(rng: &mut R, values: &[&'static str]) -> &'static str {
    values.choose(rng).copied().unwrap_or(values[0])
}

fn generate_row<R: Rng>(rng: &mut R) -> LockerRow {
    LockerRow {
        user_distance_km: round_to(rng.gen_range(0.1..=50.0), 2),
        capacity: rng.gen_range(1..=10),
        locker_type: pick(rng, LOCKER_TYPES),
        opening_hours: pick(rng, OPENING_HOURS),
        occupancy_pct: round_to(rng.gen_range(0.0..=100.0), 1),
        secure: pick(rng, YES_NO),
        accessible: pick(rng, YES_NO),
        rating: round_to(rng.gen_range(1.0..=5.0), 1),
        weather_protection: pick(rng, WEATHER_PROTECTION),
        parking: pick(rng, YES_NO),
        condition: pick(rng, CONDITIONS),
        latitude: round_to(rng.gen_range(-90.0..=90.0), 6),
        longitude: round_to(rng.gen_range(-180.0..=180.0), 6),
    }
}

fn generate_rows<R: Rng>(rng: &mut R, count: usize) -> Vec<LockerRow> {
    (0..count).map(|_| generate_row(rng)).collect()
}

impl LockerRow {
    /// Values in `HEADER` order
    fn values(&self) -> [String; 13] {
        [
            self.user_distance_km.to_string(),
            self.capacity.to_string(),
            self.locker_type.to_string(),
            self.opening_hours.to_string(),
            self.occupancy_pct.to_string(),
            self.secure.to_string(),
            self.accessible.to_string(),
            self.rating.to_string(),
            self.weather_protection.to_string(),
            self.parking.to_string(),
            self.condition.to_string(),
            self.latitude.to_string(),
            self.longitude.to_string(),
        ]
    }

    /// Row keyed by attribute name, as consumed by `AttributeRows`
    fn to_attributes(&self) -> HashMap<String, String> {
        HEADER
            .iter()
            .map(|name| name.to_string())
            .zip(self.values())
            .collect()
    }
}

fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn write_csv<W: Write>(mut out: W, rows: &[LockerRow]) -> std::io::Result<()> {
    let header: Vec<String> = HEADER.iter().map(|name| escape_csv(name)).collect();
    writeln!(out, "{}", header.join(","))?;

    for row in rows {
        let values: Vec<String> = row.values().iter().map(|v| escape_csv(v)).collect();
        writeln!(out, "{}", values.join(","))?;
    }

    out.flush()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let rows = match args.next() {
        Some(value) => value.parse()?,
        None => DEFAULT_ROWS,
    };
    let filename = args.next().unwrap_or_else(|| DEFAULT_FILE.to_string());

    println!("Generating {} lockers...", rows);

    let lockers = generate_rows(&mut rand::thread_rng(), rows);
    write_csv(BufWriter::new(File::create(&filename)?), &lockers)?;

    println!("Created {} with {} rows", filename, lockers.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use suin_recommender::config::RankingSettings;
    use suin_recommender::models::{FilterCriteria, RecommendRequest, Record, TypeFilter};
    use suin_recommender::services::{AttributeRows, DatasetSource, FnModel, ModelRegistry, Recommender};

    /// Minimal reader for the files `write_csv` produces (no quoted fields)
    fn read_csv(text: &str) -> Vec<HashMap<String, String>> {
        let mut lines = text.lines();
        let header: Vec<&str> = lines.next().unwrap().split(',').collect();
        lines
            .map(|line| {
                header
                    .iter()
                    .map(|name| name.to_string())
                    .zip(line.split(',').map(str::to_string))
                    .collect()
            })
            .collect()
    }

    fn by_type_recommender() -> Recommender {
        let mut registry = ModelRegistry::with_defaults();
        registry.register(
            "by-type",
            FnModel::new("by-type", |r: &Record| {
                Ok(match r.locker_type.as_str() {
                    "hlajen" => 0.9,
                    "suhi" => 0.6,
                    _ => 0.3,
                })
            }),
        );
        Recommender::new(registry, &RankingSettings::default())
    }

    #[test]
    fn test_rows_carry_every_attribute_in_range() {
        let rows = generate_rows(&mut StdRng::seed_from_u64(7), 500);

        for row in &rows {
            let attributes = row.to_attributes();
            assert_eq!(attributes.len(), HEADER.len());

            assert!((0.1..=50.0).contains(&row.user_distance_km));
            assert!((1..=10).contains(&row.capacity));
            assert!((0.0..=100.0).contains(&row.occupancy_pct));
            assert!((1.0..=5.0).contains(&row.rating));
            assert!((-90.0..=90.0).contains(&row.latitude));
            assert!((-180.0..=180.0).contains(&row.longitude));
            assert!(LOCKER_TYPES.contains(&row.locker_type));
            assert!(OPENING_HOURS.contains(&row.opening_hours));
            assert!(WEATHER_PROTECTION.contains(&row.weather_protection));
            assert!(CONDITIONS.contains(&row.condition));
        }
    }

    #[test]
    fn test_rows_map_to_records() {
        let rows = generate_rows(&mut StdRng::seed_from_u64(11), 200);
        let source = AttributeRows::new(rows.iter().map(LockerRow::to_attributes).collect());

        let records = source.records().unwrap();

        assert_eq!(records.len(), rows.len());
        for (record, row) in records.iter().zip(&rows) {
            assert_eq!(record.locker_type, row.locker_type);
            assert_eq!(record.accessible, row.accessible == "da");
            assert_eq!(record.parking, row.parking == "da");
            assert_eq!(record.latitude, row.latitude);
            assert_eq!(record.longitude, row.longitude);
            assert_eq!(record.suitability, None);
        }
    }

    #[test]
    fn test_csv_output_feeds_recommender() {
        let rows = generate_rows(&mut StdRng::seed_from_u64(42), 1_000);
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &rows).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().next().unwrap(), HEADER.join(","));
        assert_eq!(text.lines().count(), rows.len() + 1);

        let source = AttributeRows::new(read_csv(&text));
        let request = RecommendRequest {
            classifier: Some("by-type".to_string()),
            filters: FilterCriteria {
                require_accessible: true,
                type_filter: TypeFilter::from("hlajen"),
                ..Default::default()
            },
            top_n: Some(5),
            ..Default::default()
        };

        let response = by_type_recommender()
            .recommend_from_source(&source, &request)
            .unwrap();

        assert_eq!(response.total_records, 1_000);
        assert_eq!(response.recommendations.len(), 5);
        for rec in &response.recommendations {
            let row = &rows[rec.id as usize];
            assert_eq!(row.locker_type, "hlajen");
            assert_eq!(row.accessible, "da");
            assert!(rec.combined_score.is_finite());
        }
        for pair in response.recommendations.windows(2) {
            assert!(pair[0].combined_score >= pair[1].combined_score);
        }
    }
}
