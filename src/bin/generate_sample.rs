//! Writes `estataldelitos.csv` (Latin-1) with synthetic monthly crime counts.
//! The last year only has data through March so the partial-year note shows.

const ENTITIES: [&str; 12] = [
    "Aguascalientes",
    "Baja California",
    "Chihuahua",
    "Ciudad de México",
    "Guanajuato",
    "Jalisco",
    "México",
    "Michoacán de Ocampo",
    "Nuevo León",
    "Querétaro",
    "Veracruz de Ignacio de la Llave",
    "Yucatán",
];

const CRIME_TYPES: [(&str, f64); 18] = [
    ("Robo", 900.0),
    ("Violencia familiar", 420.0),
    ("Lesiones", 380.0),
    ("Fraude", 210.0),
    ("Amenazas", 190.0),
    ("Daño a la propiedad", 170.0),
    ("Narcomenudeo", 120.0),
    ("Homicidio", 60.0),
    ("Abuso de confianza", 55.0),
    ("Despojo", 40.0),
    ("Abuso sexual", 35.0),
    ("Extorsión", 25.0),
    ("Allanamiento de morada", 22.0),
    ("Violación", 18.0),
    ("Falsificación", 12.0),
    ("Secuestro", 4.0),
    ("Feminicidio", 3.0),
    ("Trata de personas", 1.0),
];

const MONTHS: [&str; 12] = [
    "Enero", "Febrero", "Marzo", "Abril", "Mayo", "Junio", "Julio", "Agosto", "Septiembre",
    "Octubre", "Noviembre", "Diciembre",
];

const YEARS: std::ops::RangeInclusive<i32> = 2019..=2024;
const LAST_YEAR_MONTHS: usize = 3;

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
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["Año", "Entidad", "Tipo de delito"];
    header.extend(MONTHS);
    writer.write_record(&header).expect("Failed to write header");

    let mut rows = 0usize;
    for year in YEARS {
        let months_with_data = if year == *YEARS.end() {
            LAST_YEAR_MONTHS
        } else {
            MONTHS.len()
        };

        for (e, entity) in ENTITIES.iter().enumerate() {
            let entity_scale = 0.4 + e as f64 / ENTITIES.len() as f64 * 1.6;

            for (crime, base) in CRIME_TYPES {
                let mut record = vec![year.to_string(), entity.to_string(), crime.to_string()];
                for month in 0..MONTHS.len() {
                    if month >= months_with_data {
                        record.push(String::new());
                        continue;
                    }
                    // Occasional unreported cell, as in the published data.
                    if rng.next_f64() < 0.01 {
                        record.push("ND".to_string());
                        continue;
                    }
                    let noise = 0.75 + rng.next_f64() * 0.5;
                    let count = (base * entity_scale * noise).round() as u64;
                    record.push(count.to_string());
                }
                writer.write_record(&record).expect("Failed to write row");
                rows += 1;
            }
        }
    }

    let text = String::from_utf8(writer.into_inner().expect("Failed to flush CSV"))
        .expect("CSV writer produced invalid UTF-8");
    let latin1: Vec<u8> = text
        .chars()
        .map(|c| u8::try_from(c).unwrap_or(b'?'))
        .collect();

    let output_path = "estataldelitos.csv";
    std::fs::write(output_path, latin1).expect("Failed to write output file");

    println!(
        "Wrote {rows} records ({} entities, {} crime types, years {}-{}) to {output_path}",
        ENTITIES.len(),
        CRIME_TYPES.len(),
        YEARS.start(),
        YEARS.end()
    );
}
