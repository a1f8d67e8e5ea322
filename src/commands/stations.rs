use std::io::Write;

use crate::entities::stations;
use crate::error::Error;

pub async fn run<O: Write>(out: &mut O) -> Result<(), Error> {
    for location in stations() {
        writeln!(
            out,
            "{:<5} {:<16} {:<18} {:.2}",
            location.id, location.name, location.region, location.cost_factor
        )?;
    }

    Ok(())
}

#[test]
fn stations_listing_test() {
    use tokio_test::block_on;

    let mut out = Vec::new();
    block_on(run(&mut out)).unwrap();

    let listing = String::from_utf8(out).unwrap();
    assert_eq!(listing.lines().count(), 40);
    assert_eq!(
        listing.lines().next().unwrap(),
        "KYN   Kalyan           Maharashtra        1.20"
    );
}
