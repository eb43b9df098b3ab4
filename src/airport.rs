use crate::{Error, Result};

/// One input row: `airportId  airportIATA  airportName  locationsServed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportRecord {
    pub id: u64,
    pub iata_code: String,
    pub name: String,
    /// Raw comma separated `locationsServed` column.
    pub served_cities: String,
}

impl AirportRecord {
    /// Builds a record from the fields of one TSV row. Extra fields are ignored.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        if fields.len() < 4 {
            return Err(Error::BadRow(fields.len()));
        }
        let raw_id = fields[0].as_ref().trim();
        let id = match raw_id.parse::<u64>() {
            Ok(id) if id > 0 => id,
            _ => return Err(Error::InvalidAirportId(raw_id.to_string())),
        };

        Ok(Self {
            id,
            iata_code: fields[1].as_ref().trim().to_string(),
            name: fields[2].as_ref().to_string(),
            served_cities: fields[3].as_ref().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_row() {
        let rec = AirportRecord::from_fields(&[
            "1",
            "SFO",
            "San Francisco International Airport",
            "San Francisco",
        ])
        .unwrap();
        assert_eq!(rec.id, 1);
        assert_eq!(rec.iata_code, "SFO");
        assert_eq!(rec.served_cities, "San Francisco");
    }

    #[test]
    fn rejects_short_rows() {
        let err = AirportRecord::from_fields(&["1", "SFO", "San Francisco"]).unwrap_err();
        assert!(matches!(err, Error::BadRow(3)));
    }

    #[test]
    fn rejects_zero_negative_and_non_numeric_ids() {
        for id in ["0", "-4", "abc", ""] {
            let err = AirportRecord::from_fields(&[id, "XXX", "Foo", "Bar"]).unwrap_err();
            assert!(matches!(err, Error::InvalidAirportId(_)), "id {id:?}");
        }
    }

    #[test]
    fn keeps_empty_cities_for_the_term_extractor_to_reject() {
        let rec = AirportRecord::from_fields(&["7", "XXX", "Foo", ""]).unwrap();
        assert_eq!(rec.served_cities, "");
    }
}
