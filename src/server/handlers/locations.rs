use axum::extract::{Extension, Json, Path};

use crate::api::LocationAPI;
use crate::entities::Location;
use crate::error::Error;
use crate::server::DynAPI;

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<Location>>, Error> {
    let locations = api.list_locations().await?;

    Ok(locations.into())
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<String>,
) -> Result<Json<Location>, Error> {
    let location = api.find_location(&id).await?;

    Ok(location.into())
}
