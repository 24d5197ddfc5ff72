//! Demo seed data: four shipments across India and six months of accuracy.

use crate::geocode::ResolvedAddress;
use crate::store::{Dimensions, LearningMetric, Shipment, ShipmentStatus};

fn resolved(normalized: &str, latitude: f64, longitude: f64, confidence: f64, explanation: &str) -> ResolvedAddress {
    ResolvedAddress {
        normalized_address: normalized.into(),
        latitude,
        longitude,
        confidence_score: confidence,
        parsing_explanation: explanation.into(),
    }
}

#[must_use]
pub fn shipments() -> Vec<Shipment> {
    vec![
        Shipment {
            id: "SM74839".into(),
            pickup_address: "e-506 street number 78 uttam vihar block d".into(),
            delivery_address: "B-25, Lajpat Nagar II, Near Metro Pillar 12, New Delhi".into(),
            resolved_pickup: Some(resolved(
                "E-506, Gali Number 78, Block D, Uttam Vihar, New Delhi, Delhi, 110059, India",
                28.6200,
                77.0600,
                0.92,
                "Parsed block, street, and house number from common Delhi format.",
            )),
            resolved_delivery: Some(resolved(
                "B-25, Lajpat Nagar II, New Delhi, Delhi 110024, India",
                28.5678,
                77.2426,
                0.98,
                "Identified major locality and pillar landmark for precise location.",
            )),
            status: ShipmentStatus::Delivered,
            weight_kg: 5.0,
            dimensions_cm: Dimensions { l: 30.0, w: 20.0, h: 15.0 },
            price: 450,
            eta: "Delivered".into(),
            driver: Some("Ravi Kumar".into()),
        },
        Shipment {
            id: "SM82610".into(),
            pickup_address: "Shop 4, opposite city hospital, mg road, bangalore".into(),
            delivery_address: "Flat 12B, Prestige Shantiniketan, Whitefield Main Road".into(),
            resolved_pickup: Some(resolved(
                "Shop 4, Mahatma Gandhi Rd, near City Hospital, Bengaluru, Karnataka 560001, India",
                12.9740,
                77.6075,
                0.88,
                "Used \"opposite city hospital\" as a key landmark on MG Road.",
            )),
            resolved_delivery: Some(resolved(
                "12B, Prestige Shantiniketan, Whitefield Main Rd, Bengaluru, Karnataka 560048, India",
                12.9900,
                77.7200,
                0.95,
                "Recognized major apartment complex and road for high accuracy.",
            )),
            status: ShipmentStatus::InTransit,
            weight_kg: 2.0,
            dimensions_cm: Dimensions { l: 20.0, w: 10.0, h: 5.0 },
            price: 320,
            eta: "2 days".into(),
            driver: Some("Sunita Rao".into()),
        },
        Shipment {
            id: "SM56193".into(),
            pickup_address: "chawla chicken house, model town, jalandhar".into(),
            delivery_address: "c/o ram lal, near bus stand, phagwara".into(),
            resolved_pickup: Some(resolved(
                "Chawla Chicken, Model Town Rd, Model Town, Jalandhar, Punjab 144003, India",
                31.3129,
                75.5653,
                0.65,
                "Identified a popular restaurant but the exact pickup point is ambiguous.",
            )),
            resolved_delivery: Some(resolved(
                "Near Bus Stand, Phagwara, Punjab 144401, India",
                31.2223,
                75.7723,
                0.55,
                "General area identified, but \"c/o\" and landmark are not specific.",
            )),
            status: ShipmentStatus::PendingResolution,
            weight_kg: 15.0,
            dimensions_cm: Dimensions { l: 50.0, w: 40.0, h: 30.0 },
            price: 850,
            eta: "4 days".into(),
            driver: Some("Amit Singh".into()),
        },
        Shipment {
            id: "SM99021".into(),
            pickup_address: "behind tech park, hinjewadi phase 2 pune".into(),
            delivery_address: "amanora park town, hadapsar, pune".into(),
            resolved_pickup: Some(resolved(
                "Hinjawadi Phase 2, behind Tech Park, Pune, Maharashtra 411057, India",
                18.5912,
                73.7389,
                0.91,
                "Used \"behind tech park\" to narrow down the area in Hinjewadi Phase 2.",
            )),
            resolved_delivery: Some(resolved(
                "Amanora Park Town, Hadapsar, Pune, Maharashtra 411028, India",
                18.5193,
                73.9472,
                0.99,
                "Identified major township for precise location.",
            )),
            status: ShipmentStatus::OutForDelivery,
            weight_kg: 8.0,
            dimensions_cm: Dimensions { l: 40.0, w: 25.0, h: 20.0 },
            price: 600,
            eta: "Today".into(),
            driver: Some("Priya Deshmukh".into()),
        },
    ]
}

#[must_use]
pub fn learning_metrics() -> Vec<LearningMetric> {
    [("Jan", 75.2), ("Feb", 78.9), ("Mar", 81.5), ("Apr", 84.1), ("May", 86.8), ("June", 89.3)]
        .into_iter()
        .map(|(month, accuracy)| LearningMetric { month: month.into(), accuracy })
        .collect()
}
