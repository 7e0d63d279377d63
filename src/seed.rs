//! Seed collections written the first time a key is read.
//!
//! Services and projects must never be empty, so their seeds carry a few
//! records each. Transactional collections start empty.

use crate::domain::{Campaign, CampaignStatus, Project, RecordMeta, Service};

pub fn services() -> Vec<Service> {
    vec![
        Service {
            meta: RecordMeta::seed("svc_001"),
            slug: "biodigester-installation".to_string(),
            name: "Biodigester Installation".to_string(),
            tagline: Some("Turn farm waste into clean cooking gas".to_string()),
            category: Some("Biogas & Energy".to_string()),
            description: None,
            hero_image: None,
            icon_key: Some("biogas".to_string()),
            is_featured: true,
            features: vec![
                "Site assessment".to_string(),
                "Fixed-dome construction".to_string(),
                "Operator training".to_string(),
            ],
        },
        Service {
            meta: RecordMeta::seed("svc_002"),
            slug: "farm-structures".to_string(),
            name: "Farm Structures".to_string(),
            tagline: Some("Animal housing and storage built to last".to_string()),
            category: Some("Construction".to_string()),
            description: None,
            hero_image: None,
            icon_key: Some("construction".to_string()),
            is_featured: true,
            features: vec!["Zero-grazing units".to_string(), "Feed stores".to_string()],
        },
        Service {
            meta: RecordMeta::seed("svc_003"),
            slug: "water-harvesting".to_string(),
            name: "Water Harvesting".to_string(),
            tagline: None,
            category: Some("Water".to_string()),
            description: None,
            hero_image: None,
            icon_key: Some("water".to_string()),
            is_featured: false,
            features: Vec::new(),
        },
    ]
}

pub fn projects() -> Vec<Project> {
    vec![
        Project {
            meta: RecordMeta::seed("proj_001"),
            slug: "kawanda-biogas-plant".to_string(),
            name: "Kawanda Biogas Plant".to_string(),
            client_name: None,
            location: Some("Kampala, Uganda".to_string()),
            category: Some("Biogas".to_string()),
            summary: Some("Institutional biodigester serving a school kitchen".to_string()),
            description: None,
            hero_image: None,
            gallery: Vec::new(),
            year: Some(2023),
            is_featured: true,
        },
        Project {
            meta: RecordMeta::seed("proj_002"),
            slug: "mukono-dairy-unit".to_string(),
            name: "Mukono Dairy Unit".to_string(),
            client_name: None,
            location: Some("Mukono, Uganda".to_string()),
            category: Some("Construction".to_string()),
            summary: None,
            description: None,
            hero_image: None,
            gallery: Vec::new(),
            year: Some(2024),
            is_featured: false,
        },
    ]
}

pub fn campaigns() -> Vec<Campaign> {
    vec![
        Campaign {
            meta: RecordMeta::seed("cmp_schools"),
            name: "Biogas for Schools".to_string(),
            slug: "biogas-for-schools".to_string(),
            description: Some(
                "Install biodigesters in rural schools to replace firewood cooking.".to_string(),
            ),
            target_amount: Some(100_000_000.0),
            raised_amount: 0.0,
            status: CampaignStatus::Active,
            is_active: true,
        },
        Campaign {
            meta: RecordMeta::seed("cmp_households"),
            name: "Household Biodigesters".to_string(),
            slug: "household-biodigesters".to_string(),
            description: Some("Subsidise small biodigesters for farming households.".to_string()),
            target_amount: Some(50_000_000.0),
            raised_amount: 0.0,
            status: CampaignStatus::Draft,
            is_active: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_ids_are_unique_and_prefixed() {
        let mut ids = HashSet::new();
        for id in services().iter().map(|s| &s.meta.id) {
            assert!(id.starts_with("svc_"));
            assert!(ids.insert(id.clone()));
        }
        for id in projects().iter().map(|p| &p.meta.id) {
            assert!(id.starts_with("proj_"));
            assert!(ids.insert(id.clone()));
        }
        for id in campaigns().iter().map(|c| &c.meta.id) {
            assert!(id.starts_with("cmp_"));
            assert!(ids.insert(id.clone()));
        }
    }

    #[test]
    fn test_required_seeds_are_not_empty() {
        assert!(!services().is_empty());
        assert!(!projects().is_empty());
    }
}
