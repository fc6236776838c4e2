//! Static subcategory lists and the tag-precedence classifier.

use crate::types::Tags;

/// Tag columns in precedence order. A venue tagged with several of these is
/// categorized by the first one present.
pub const TAG_PRECEDENCE: [&str; 5] = ["amenity", "shop", "office", "leisure", "tourism"];

pub const BUSINESS_SUBCATEGORIES: &[&str] = &[
    "restaurant", "fast_food", "cafe", "kiosk", "hotel", "hostel", "guest_house",
    "supermarket", "bakery", "convenience", "variety_store", "stationery",
    "clothes", "shoes", "books", "gift", "jewelry", "florist", "tattoo", "bar",
    "pub", "nightclub", "hairdresser", "beauty", "dentist", "clinic",
    "pharmacy", "veterinary", "optician", "cosmetics", "lawyer", "travel_agency",
    "bureau_de_change", "photo", "confectionery", "toys", "electronics", "mobile_phone",
    "computer", "department_store", "lottery", "laundry", "furniture", "ice_cream",
    "houseware", "greengrocer", "deli", "hardware", "butcher", "copyshop",
    "craft", "curtain", "baby_goods", "camera", "fitness_centre", "company", "bed",
    "home", "tea", "coffee", "e-cigarette", "apartment", "car_rental", "car_parts",
    "car_repair", "bicycle", "travel", "sports", "plastics",
];

pub const NON_BUSINESS_SUBCATEGORIES: &[&str] = &[
    "parking", "fuel", "information", "viewpoint", "drinking_water", "attraction",
    "playground", "post_office", "bank", "place_of_worship", "sports_centre",
    "telephone", "fire_station", "school", "kindergarten", "theatre", "artwork",
    "shelter", "hospital", "pitch", "community_centre", "post_box", "bench",
    "recycling", "vending_machine", "swimming_pool", "picnic_table", "slipway",
    "food_court", "taxi", "dojo", "billiards", "museum", "library", "fountain",
    "park", "picnic_site", "waste_basket", "atm", "government", "bus_station",
    "tyres", "marina", "yes", "dog_park", "garden", "waste_disposal", "lighting",
    "nuts", "studio", "diplomatic", "ferry_terminal", "bicycle_parking",
    "bookmaker", "fitness_station", "college", "motorcycle_parking",
    "charging_station", "trampoline_park", "outpost", "radiotechnics",
    "townhall", "tobacco", "bicycle_repair_station",
];

// food_court and vending_machine are non-business, so they never count as
// food businesses; they still set `is_food` in the node dataset.
pub const FOOD_SUBCATEGORIES: &[&str] = &[
    "restaurant", "fast_food", "cafe", "food_court", "ice_cream", "pub",
    "bar", "vending_machine", "bakery", "deli", "tea", "coffee",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubcategoryClass {
    Business,
    NonBusiness,
    /// In neither list.
    Unlisted,
}

impl SubcategoryClass {
    pub fn of(subcategory: &str) -> Self {
        if is_business(subcategory) {
            SubcategoryClass::Business
        } else if is_non_business(subcategory) {
            SubcategoryClass::NonBusiness
        } else {
            SubcategoryClass::Unlisted
        }
    }
}

pub fn is_business(subcategory: &str) -> bool {
    BUSINESS_SUBCATEGORIES.contains(&subcategory)
}

pub fn is_non_business(subcategory: &str) -> bool {
    NON_BUSINESS_SUBCATEGORIES.contains(&subcategory)
}

pub fn is_food(subcategory: &str) -> bool {
    FOOD_SUBCATEGORIES.contains(&subcategory)
}

pub fn is_food_business(subcategory: &str) -> bool {
    is_business(subcategory) && is_food(subcategory)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: &'static str,
    pub subcategory: String,
}

/// Returns `None` when no tag column is set.
pub fn classify(tags: &Tags) -> Option<Classification> {
    TAG_PRECEDENCE
        .iter()
        .zip(tags.iter())
        .find_map(|(column, value)| {
            value.as_ref().map(|v| Classification {
                category: *column,
                subcategory: v.clone(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn tags(amenity: Option<&str>, shop: Option<&str>, tourism: Option<&str>) -> Tags {
        [
            amenity.map(String::from),
            shop.map(String::from),
            None,
            None,
            tourism.map(String::from),
        ]
    }

    #[test]
    fn lists_are_disjoint() {
        let business: HashSet<_> = BUSINESS_SUBCATEGORIES.iter().collect();
        let non_business: HashSet<_> = NON_BUSINESS_SUBCATEGORIES.iter().collect();
        assert!(business.is_disjoint(&non_business));
        assert_eq!(business.len(), BUSINESS_SUBCATEGORIES.len());
        assert_eq!(non_business.len(), NON_BUSINESS_SUBCATEGORIES.len());
    }

    #[test]
    fn food_businesses_are_businesses() {
        for sub in FOOD_SUBCATEGORIES {
            if is_food_business(sub) {
                assert!(is_business(sub));
            }
        }
        assert!(!is_food_business("vending_machine"));
        assert!(!is_food_business("food_court"));
        assert!(is_food_business("bakery"));
    }

    #[test]
    fn first_tag_in_precedence_wins() {
        let c = classify(&tags(Some("cafe"), Some("bakery"), None)).unwrap();
        assert_eq!(c.category, "amenity");
        assert_eq!(c.subcategory, "cafe");

        let c = classify(&tags(None, Some("bakery"), Some("hotel"))).unwrap();
        assert_eq!(c.category, "shop");
        assert_eq!(c.subcategory, "bakery");
    }

    #[test]
    fn untagged_is_not_classified() {
        assert_eq!(classify(&tags(None, None, None)), None);
    }

    #[test]
    fn subcategory_class() {
        assert_eq!(SubcategoryClass::of("restaurant"), SubcategoryClass::Business);
        assert_eq!(SubcategoryClass::of("parking"), SubcategoryClass::NonBusiness);
        assert_eq!(SubcategoryClass::of("spaceport"), SubcategoryClass::Unlisted);
    }
}
