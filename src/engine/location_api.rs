use super::Engine;

use async_trait::async_trait;

use crate::{
    api::LocationAPI,
    entities::{find_station, is_valid_location_pair, Location},
    error::{location_not_found_error, Error},
};

#[async_trait]
impl LocationAPI for Engine {
    async fn list_locations(&self) -> Result<Vec<Location>, Error> {
        Ok(self.locations.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn find_location(&self, id: &str) -> Result<Location, Error> {
        find_station(id).ok_or_else(|| location_not_found_error(id))
    }

    fn is_valid_location_pair(&self, source_id: &str, destination_id: &str) -> bool {
        is_valid_location_pair(source_id, destination_id)
    }
}

#[test]
fn find_location_test() {
    use crate::config::Backend;
    use tokio_test::block_on;

    let engine = Engine::new(Backend::Formula);

    let delhi = block_on(engine.find_location("DHI")).unwrap();
    assert_eq!(delhi.name, "Delhi");
    assert_eq!(delhi.cost_factor, 1.4);

    let nasik = block_on(engine.find_location("nk")).unwrap();
    assert_eq!(nasik.id, "NK");

    let err = block_on(engine.find_location("XYZ")).unwrap_err();
    assert_eq!(err.code, 105);

    assert_eq!(block_on(engine.list_locations()).unwrap().len(), 40);
    assert!(!engine.is_valid_location_pair("DHI", "DHI"));
}
