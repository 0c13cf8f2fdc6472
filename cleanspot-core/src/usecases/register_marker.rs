use super::prelude::*;

#[derive(Debug, Clone)]
pub struct NewMarker {
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    pub address: Option<String>,
    pub reported_by: Id,
}

pub fn register_marker<R>(repo: &R, new_marker: NewMarker) -> Result<Marker>
where
    R: MarkerRepo + UserRepo,
{
    let NewMarker {
        lat,
        lng,
        description,
        address,
        reported_by,
    } = new_marker;

    // The reporter must exist before anything is owned by them.
    let reporter = repo.get_user(&reported_by)?;

    let now = Timestamp::now();
    let marker = Marker {
        id: Id::new(),
        coordinates: Coordinates { lat, lng },
        description,
        address,
        status: MarkerStatus::default(),
        reported_by: reporter.id,
        created_at: now,
        updated_at: now,
    };
    repo.create_marker(&marker)?;
    log::info!("Registered marker {} at ({lat}, {lng})", marker.id);
    Ok(marker)
}
