use anyhow::{Context, Result};
use serde::Serialize;

/// One output row, with the column names the dashboard expects.
#[derive(Serialize)]
struct LaunchRow {
    #[serde(rename = "Flight Number")]
    flight_number: u32,
    #[serde(rename = "Launch Site")]
    launch_site: &'static str,
    #[serde(rename = "class")]
    class: u8,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "Booster Version")]
    booster_version: String,
    #[serde(rename = "Booster Version Category")]
    booster_version_category: &'static str,
}

/// Booster generations: (category, flights flown, payload ceiling kg, success rate).
const ERAS: [(&str, u32, f64, f64); 5] = [
    ("v1.0", 5, 1_000.0, 0.2),
    ("v1.1", 15, 5_000.0, 0.35),
    ("FT", 24, 9_600.0, 0.7),
    ("B4", 11, 7_000.0, 0.55),
    ("B5", 1, 4_000.0, 1.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "spacex_launch_dash.csv".to_string());

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut flight_number = 0;
    for (category, flights, ceiling, success_rate) in ERAS {
        for _ in 0..flights {
            flight_number += 1;
            // Early flights carried a dummy payload.
            let payload = if flight_number <= 2 {
                0.0
            } else {
                (rng.next_f64() * ceiling).round()
            };
            let row = LaunchRow {
                flight_number,
                launch_site: *rng.pick(&SITES),
                class: u8::from(rng.next_f64() < success_rate),
                payload_mass_kg: payload,
                booster_version: format!("F9 {category} B{:04}", 1000 + flight_number),
                booster_version_category: category,
            };
            writer.serialize(&row).context("writing CSV row")?;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {flight_number} launches to {output_path}");
    Ok(())
}
