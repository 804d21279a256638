use thiserror::Error;

use crate::model::Location;

/// Rejections raised while reading the location field, before any request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationInputError {
    #[error("Please enter a location")]
    Empty,

    #[error("Invalid coordinates format. Use 'lat,lon'")]
    InvalidCoordinates,
}

/// Parse user input into a [`Location`].
///
/// Input containing a comma must be exactly two floats (`"40.7,-74.0"`);
/// anything else is taken as a place name.
pub fn parse_location(input: &str) -> Result<Location, LocationInputError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(LocationInputError::Empty);
    }

    if !input.contains(',') {
        return Ok(Location::Place(input.to_string()));
    }

    let mut parts = input.split(',');
    let (Some(lat), Some(lon), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(LocationInputError::InvalidCoordinates);
    };

    Ok(Location::Coordinates {
        lat: parse_coordinate(lat)?,
        lon: parse_coordinate(lon)?,
    })
}

fn parse_coordinate(part: &str) -> Result<f64, LocationInputError> {
    part.trim()
        .parse()
        .map_err(|_| LocationInputError::InvalidCoordinates)
}
