//! Synthetic product dataset
//!
//! The generator is seeded, so the same `(seed, per_category, anchor)` always
//! yields the same products. Ids are assigned sequentially across categories
//! (`itm_001` ... `itm_245` with the default of 35 per category).

use crate::core::product::Product;
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

pub const DEFAULT_SEED: u64 = 0x00c0_ffee;
pub const DEFAULT_PER_CATEGORY: usize = 35;

/// Categories in generation order
pub const CATEGORIES: [&str; 7] = [
    "Electronics",
    "Audio",
    "Computers",
    "Mobile",
    "Gaming",
    "Wearables",
    "Accessories",
];

const BRANDS: [&str; 8] = [
    "TechPro",
    "SoundWave",
    "PixelMax",
    "GameForce",
    "SmartLife",
    "Premium",
    "Elite",
    "Ultra",
];

const ADJECTIVES: [&str; 10] = [
    "Pro",
    "Plus",
    "Max",
    "Lite",
    "Air",
    "Mini",
    "Ultra",
    "Premium",
    "Elite",
    "Essential",
];

const CURRENCY: &str = "ZAR";

/// How far back `updated_at` may go from the anchor
const MAX_AGE_DAYS: i64 = 730;

fn base_names(category: &str) -> &'static [&'static str] {
    match category {
        "Electronics" => &[
            "Smart TV",
            "Tablet",
            "E-Reader",
            "Digital Camera",
            "Action Camera",
            "Drone",
        ],
        "Audio" => &[
            "Wireless Headphones",
            "Earbuds",
            "Bluetooth Speaker",
            "Soundbar",
            "Studio Monitors",
            "Microphone",
        ],
        "Computers" => &["Laptop", "Desktop PC", "Monitor", "Keyboard", "Mouse", "Webcam"],
        "Mobile" => &[
            "Smartphone",
            "Phone Case",
            "Screen Protector",
            "Wireless Charger",
            "Power Bank",
            "Car Mount",
        ],
        "Gaming" => &[
            "Gaming Console",
            "Controller",
            "Gaming Headset",
            "Gaming Chair",
            "Gaming Mouse",
            "Mechanical Keyboard",
        ],
        "Wearables" => &[
            "Smartwatch",
            "Fitness Tracker",
            "Smart Ring",
            "Smart Glasses",
            "Heart Rate Monitor",
        ],
        _ => &[
            "USB Cable",
            "Adapter",
            "External SSD",
            "Memory Card",
            "Laptop Bag",
            "Phone Stand",
        ],
    }
}

/// Seeded product generator
#[derive(Debug, Clone)]
pub struct ProductGenerator {
    seed: u64,
    per_category: usize,
    anchor: DateTime<Utc>,
}

impl ProductGenerator {
    /// `anchor` is the "now" that `updated_at` values are measured back from
    pub fn new(seed: u64, per_category: usize, anchor: DateTime<Utc>) -> Self {
        Self {
            seed,
            per_category,
            anchor,
        }
    }

    pub fn generate(&self) -> Vec<Product> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut products = Vec::with_capacity(CATEGORIES.len() * self.per_category);
        let mut counter = 1usize;

        for category in CATEGORIES {
            let names = base_names(category);
            for i in 0..self.per_category {
                let base_name = names[i % names.len()];
                products.push(self.product(&mut rng, counter, category, base_name, i, names.len()));
                counter += 1;
            }
        }

        tracing::debug!(count = products.len(), seed = self.seed, "Generated product dataset");
        products
    }

    fn product(
        &self,
        rng: &mut StdRng,
        counter: usize,
        category: &str,
        base_name: &str,
        index: usize,
        name_count: usize,
    ) -> Product {
        let brand = pick(rng, &BRANDS);
        let adjective = pick(rng, &ADJECTIVES);
        // Later laps over the name list get a distinguishing suffix
        let variant = if index > name_count {
            format!(" {}", adjective)
        } else {
            String::new()
        };

        let price = round_to(rng.random::<f64>() * 900.0 + 50.0, 2);
        let rating = round_to(rng.random::<f64>() * 2.0 + 3.0, 1);
        let review_count = rng.random_range(10..510);
        let in_stock = rng.random::<f64>() > 0.15;

        let mut tags = vec![category.to_lowercase()];
        if base_name.to_lowercase().contains("wireless") || rng.random::<f64>() > 0.7 {
            tags.push("wireless".to_string());
        }
        if price > 500.0 {
            tags.push("premium".to_string());
        }
        if rating > 4.5 {
            tags.push("top-rated".to_string());
        }
        if rng.random::<f64>() > 0.7 {
            tags.push("bestseller".to_string());
        }
        if rng.random::<f64>() > 0.8 {
            tags.push("new".to_string());
        }

        let days_ago = rng.random_range(0..MAX_AGE_DAYS);
        let updated_at = self.anchor - Duration::days(days_ago);

        let specifications = specifications(rng, category, brand);

        let name = format!("{} {}{}", brand, base_name, variant);
        let text = |s: &str| urlencoding::encode(s).into_owned();

        Product {
            id: format!("itm_{:03}", counter),
            description: format!(
                "Experience the {} - a perfect blend of performance and design. {} designed for modern users who demand quality and reliability. Features cutting-edge technology and premium materials for an exceptional user experience.",
                name, base_name
            ),
            name,
            price,
            currency: CURRENCY.to_string(),
            rating,
            review_count,
            tags,
            category: category.to_string(),
            in_stock,
            image_url: format!(
                "https://placehold.co/400x400/e2e8f0/475569?text={}",
                text(base_name)
            ),
            specifications,
            updated_at,
            images: vec![
                format!(
                    "https://placehold.co/800x800/e2e8f0/475569?text={}",
                    text(base_name)
                ),
                format!(
                    "https://placehold.co/800x800/cbd5e1/334155?text={}",
                    text(&format!("{} 2", base_name))
                ),
                format!(
                    "https://placehold.co/800x800/94a3b8/1e293b?text={}",
                    text(&format!("{} 3", base_name))
                ),
            ],
        }
    }
}

impl Default for ProductGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_SEED, DEFAULT_PER_CATEGORY, Utc::now())
    }
}

fn specifications(rng: &mut StdRng, category: &str, brand: &str) -> IndexMap<String, String> {
    let mut specs = IndexMap::new();

    match category {
        "Electronics" | "Computers" => {
            specs.insert(
                "Screen Size".to_string(),
                format!("{}\"", rng.random_range(13..33)),
            );
            specs.insert(
                "Resolution".to_string(),
                pick(rng, &["1920x1080", "2560x1440", "3840x2160"]).to_string(),
            );
        }
        "Audio" => {
            specs.insert(
                "Battery Life".to_string(),
                format!("{} hours", rng.random_range(10..40)),
            );
            specs.insert(
                "Driver Size".to_string(),
                format!("{}mm", rng.random_range(40..50)),
            );
        }
        "Gaming" => {
            specs.insert(
                "Platform".to_string(),
                pick(rng, &["PlayStation", "Xbox", "PC", "Multi-platform"]).to_string(),
            );
            specs.insert(
                "Color".to_string(),
                pick(rng, &["Black", "White", "Red", "Blue"]).to_string(),
            );
        }
        _ => {}
    }

    specs.insert(
        "Weight".to_string(),
        format!("{:.1} kg", rng.random::<f64>() * 2.0 + 0.2),
    );
    specs.insert("Brand".to_string(), brand.to_string());
    specs
}

fn pick<'a>(rng: &mut StdRng, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_generates_per_category_with_sequential_ids() {
        let products = ProductGenerator::new(1, 35, anchor()).generate();

        assert_eq!(products.len(), 245);
        assert_eq!(products[0].id, "itm_001");
        assert_eq!(products[244].id, "itm_245");

        let ids: HashSet<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), products.len());

        for category in CATEGORIES {
            let count = products.iter().filter(|p| p.category == category).count();
            assert_eq!(count, 35, "category {}", category);
        }
    }

    #[test]
    fn test_image_urls_percent_encode_spaces() {
        let products = ProductGenerator::new(3, 2, anchor()).generate();

        for product in &products {
            assert!(!product.image_url.contains('+'), "{}", product.image_url);
            assert!(product.images[1].ends_with("%202"), "{}", product.images[1]);
            assert!(product.images.iter().all(|url| !url.contains(' ')));
        }
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let a = ProductGenerator::new(7, 10, anchor()).generate();
        let b = ProductGenerator::new(7, 10, anchor()).generate();
        assert_eq!(a, b);

        let c = ProductGenerator::new(8, 10, anchor()).generate();
        assert_ne!(a, c);
    }

    #[test]
    fn test_value_ranges_and_tag_rules() {
        let products = ProductGenerator::new(3, 35, anchor()).generate();

        for p in &products {
            assert!((50.0..=950.0).contains(&p.price), "price {}", p.price);
            assert!((3.0..=5.0).contains(&p.rating), "rating {}", p.rating);
            assert!((10..510).contains(&p.review_count));
            assert_eq!(p.currency, "ZAR");
            assert!(p.updated_at <= anchor());
            assert!(p.updated_at > anchor() - Duration::days(MAX_AGE_DAYS));

            assert!(p.has_tag(&p.category.to_lowercase()));
            assert_eq!(p.has_tag("premium"), p.price > 500.0);
            assert_eq!(p.has_tag("top-rated"), p.rating > 4.5);
            if p.name.to_lowercase().contains("wireless") {
                assert!(p.has_tag("wireless"));
            }

            assert!(p.specifications.contains_key("Weight"));
            assert!(p.specifications.contains_key("Brand"));
            assert_eq!(p.images.len(), 3);
        }
    }

    #[test]
    fn test_category_specifications() {
        let products = ProductGenerator::new(5, 6, anchor()).generate();

        let audio = products.iter().find(|p| p.category == "Audio").unwrap();
        assert!(audio.specifications.contains_key("Battery Life"));
        assert!(audio.specifications.contains_key("Driver Size"));

        let gaming = products.iter().find(|p| p.category == "Gaming").unwrap();
        assert!(gaming.specifications.contains_key("Platform"));

        let mobile = products.iter().find(|p| p.category == "Mobile").unwrap();
        assert_eq!(
            mobile.specifications.keys().collect::<Vec<_>>(),
            vec!["Weight", "Brand"]
        );
    }
}
