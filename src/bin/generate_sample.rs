//! Generate synthetic XRD / IR / BET / TGA sample files for manual testing.

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn write_csv(path: &str, headers: &[&str], rows: &[Vec<String>]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create output file");
    writer.write_record(headers).expect("Failed to write header");
    for row in rows {
        writer.write_record(row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush writer");
    println!("Wrote {} rows to {path}", rows.len());
}

fn generate_xrd(rng: &mut SimpleRng) {
    // 2θ from 10° to 80°, step 0.05
    let peaks = [
        (26.6, 0.15, 850.0),
        (33.1, 0.20, 420.0),
        (39.5, 0.18, 310.0),
        (54.3, 0.25, 190.0),
        (68.0, 0.30, 120.0),
    ];
    let rows: Vec<Vec<String>> = (0..1400)
        .map(|i| {
            let pos = 10.0 + i as f64 * 0.05;
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(pos, mu, sigma, amp))
                .sum();
            let iobs = 50.0 + signal + rng.gauss(0.0, 4.0);
            vec![format!("{pos:.2}"), format!("{iobs:.2}")]
        })
        .collect();
    write_csv("xrd_sample.csv", &["Pos [°2θ]", "Iobs"], &rows);
}

fn generate_ir(rng: &mut SimpleRng) {
    // Wavenumbers 4000 → 400, step 2
    let peaks = [
        (3400.0, 80.0, 0.8),
        (2900.0, 40.0, 0.5),
        (1710.0, 25.0, 0.9),
        (1050.0, 30.0, 0.6),
    ];
    let rows: Vec<Vec<String>> = (0..1800)
        .map(|i| {
            let wn = 4000.0 - i as f64 * 2.0;
            let signal: f64 = peaks
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(wn, mu, sigma, amp))
                .sum();
            let absorbance = 0.05 + signal + rng.gauss(0.0, 0.005);
            vec![format!("{wn:.1}"), format!("{absorbance:.5}")]
        })
        .collect();
    write_csv("ir_sample.csv", &["Wavenumber", "Absorbance"], &rows);
}

fn generate_bet(rng: &mut SimpleRng) {
    // BET isotherm with Vm = 35 cm³/g, C = 120
    let (vm, c) = (35.0, 120.0);
    let rows: Vec<Vec<String>> = (1..=38)
        .map(|i| {
            let ppo = i as f64 * 0.025;
            let va = vm * c * ppo / ((1.0 - ppo) * (1.0 + (c - 1.0) * ppo))
                + rng.gauss(0.0, 0.05);
            vec![format!("{ppo:.3}"), format!("{va:.4}")]
        })
        .collect();
    write_csv("bet_sample.csv", &["P/P0", "Va"], &rows);
}

fn generate_tga(rng: &mut SimpleRng) {
    let rows: Vec<Vec<String>> = (0..10)
        .map(|i| {
            let capacity = 1.1 + i as f64 * 0.08 + rng.gauss(0.0, 0.02);
            let energy = 42.0 + i as f64 * 1.5 + rng.gauss(0.0, 0.4);
            vec![format!("{capacity:.3}"), format!("{energy:.2}")]
        })
        .collect();
    write_csv(
        "tga_sample.csv",
        &[
            "Adsorption Capacity (mmol/g)",
            "Desorption Energy Consumption (kJ/mol)",
        ],
        &rows,
    );
}

fn main() {
    let mut rng = SimpleRng::new(42);
    generate_xrd(&mut rng);
    generate_ir(&mut rng);
    generate_bet(&mut rng);
    generate_tga(&mut rng);
}
