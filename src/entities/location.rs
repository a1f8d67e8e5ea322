use serde::{Deserialize, Serialize};

/// A railway station and its relative cost-of-service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub region: String,
    pub cost_factor: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Location {
    pub fn new(id: &str, name: &str, region: &str, cost_factor: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region: region.into(),
            cost_factor,
            lat: None,
            lng: None,
        }
    }
}

const STATIONS: [(&str, &str, &str, f64); 40] = [
    ("KYN", "Kalyan", "Maharashtra", 1.2),
    ("NGSM", "Nagasamudram", "Andhra Pradesh", 1.1),
    ("DHI", "Delhi", "Delhi", 1.4),
    ("JL", "Jalandhar", "Punjab", 1.15),
    ("KNW", "Kanpur", "Uttar Pradesh", 1.2),
    ("NGN", "Nagina", "Uttar Pradesh", 1.1),
    ("NK", "Nasik", "Maharashtra", 1.2),
    ("ANG", "Angul", "Odisha", 1.1),
    ("BAP", "Baripada", "Odisha", 1.1),
    ("ET", "Etawah", "Uttar Pradesh", 1.15),
    ("DDE", "Daudpur", "Bihar", 1.1),
    ("ST", "Satna", "Madhya Pradesh", 1.15),
    ("BRCY", "Vadodara", "Gujarat", 1.25),
    ("SJP", "Shahjahanpur", "Uttar Pradesh", 1.15),
    ("BAU", "Balurghat", "West Bengal", 1.1),
    ("BD", "Baddi", "Himachal Pradesh", 1.2),
    ("KMN", "Kumarganj", "West Bengal", 1.1),
    ("BZU", "Bazpur", "Uttarakhand", 1.2),
    ("MJY", "Majhola", "Uttar Pradesh", 1.1),
    ("WRS", "Warisaliganj", "Bihar", 1.1),
    ("SBGG", "Sabarmati", "Gujarat", 1.25),
    ("ANDI", "Anand", "Gujarat", 1.2),
    ("GZB", "Ghaziabad", "Uttar Pradesh", 1.3),
    ("MTDI", "Moti Daman", "Daman & Diu", 1.15),
    ("SVW", "Sivakasi", "Tamil Nadu", 1.1),
    ("BTC", "Bhatinda", "Punjab", 1.15),
    ("MFR", "Muzaffarpur", "Bihar", 1.15),
    ("KPFP", "Kapurthala", "Punjab", 1.15),
    ("NSZ", "Nashik Road", "Maharashtra", 1.2),
    ("AN", "Anand Nagar", "Maharashtra", 1.2),
    ("BIRD", "Birdwal", "Rajasthan", 1.15),
    ("LONI", "Lonikand", "Maharashtra", 1.2),
    ("MRJ", "Miraj", "Maharashtra", 1.2),
    ("TAPG", "Tapang", "Odisha", 1.1),
    ("TPND", "Tirupati North", "Andhra Pradesh", 1.15),
    ("AWB", "Aurangabad", "Maharashtra", 1.2),
    ("BPTG", "Bhupalpally", "Telangana", 1.15),
    ("FUT", "Fatehpur", "Uttar Pradesh", 1.15),
    ("MPIB", "Mughalpura", "Punjab", 1.15),
    ("SAI", "Sai Nagar", "Maharashtra", 1.2),
];

pub fn stations() -> Vec<Location> {
    STATIONS
        .iter()
        .map(|&(id, name, region, cost_factor)| Location::new(id, name, region, cost_factor))
        .collect()
}

/// Looks up a station by code, ignoring ASCII case.
pub fn find_station(id: &str) -> Option<Location> {
    STATIONS
        .iter()
        .find(|(station_id, ..)| station_id.eq_ignore_ascii_case(id))
        .map(|&(id, name, region, cost_factor)| Location::new(id, name, region, cost_factor))
}

/// Any two distinct stations may be connected.
pub fn is_valid_location_pair(source_id: &str, destination_id: &str) -> bool {
    source_id != destination_id
}

#[test]
fn station_catalog_test() {
    let stations = stations();
    assert_eq!(stations.len(), 40);

    let kalyan = stations.iter().find(|s| s.id == "KYN").unwrap();
    assert_eq!(kalyan.name, "Kalyan");
    assert_eq!(kalyan.cost_factor, 1.2);

    let mut ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 40);
}

#[test]
fn find_station_test() {
    assert_eq!(find_station("ngsm").unwrap().name, "Nagasamudram");
    assert_eq!(find_station("DHI").unwrap().cost_factor, 1.4);
    assert!(find_station("XYZ").is_none());
}

#[test]
fn location_pair_test() {
    assert!(is_valid_location_pair("KYN", "NGSM"));
    assert!(!is_valid_location_pair("KYN", "KYN"));
}

#[test]
fn location_wire_format_test() {
    let value = serde_json::to_value(Location::new("DHI", "Delhi", "Delhi", 1.4)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "id": "DHI",
            "name": "Delhi",
            "region": "Delhi",
            "costFactor": 1.4,
        })
    );
}
