use std::fmt::{self, Write as _};

use crate::Instance;

/// Render `instance` as `EXPLICIT` / `FULL_MATRIX` text.
///
/// Coordinates, when present, are written as a `DISPLAY_DATA_SECTION` so
/// that parsing the output restores both the distances and the display
/// points exactly.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourkit_core::{EdgeWeightType, Instance, tsplib};
///
/// let points = vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 3.0, y: 4.0 }];
/// let instance = Instance::from_points(EdgeWeightType::Euc2d, points)?;
/// let text = tsplib::write_full_matrix(&instance);
/// assert!(text.contains("EDGE_WEIGHT_FORMAT : FULL_MATRIX"));
///
/// let reread = tsplib::parse(&text).expect("written text parses");
/// assert_eq!(reread.matrix(), instance.matrix());
/// assert_eq!(reread.coordinates(), instance.coordinates());
/// # Ok::<(), tourkit_core::InstanceError>(())
/// ```
#[must_use]
pub fn write_full_matrix(instance: &Instance) -> String {
    FullMatrix(instance).to_string()
}

struct FullMatrix<'a>(&'a Instance);

impl fmt::Display for FullMatrix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = self.0;
        let info = instance.info();
        if let Some(name) = &info.name {
            writeln!(f, "NAME : {name}")?;
        }
        writeln!(f, "TYPE : TSP")?;
        if let Some(comment) = &info.comment {
            writeln!(f, "COMMENT : {comment}")?;
        }
        writeln!(f, "DIMENSION : {}", instance.dimension())?;
        writeln!(f, "EDGE_WEIGHT_TYPE : EXPLICIT")?;
        writeln!(f, "EDGE_WEIGHT_FORMAT : FULL_MATRIX")?;
        if instance.coordinates().is_some() {
            writeln!(f, "DISPLAY_DATA_TYPE : TWOD_DISPLAY")?;
        }

        writeln!(f, "EDGE_WEIGHT_SECTION")?;
        let mut row_text = String::new();
        for city in instance.cities() {
            row_text.clear();
            for value in instance.matrix().row(city) {
                if !row_text.is_empty() {
                    row_text.push(' ');
                }
                write!(row_text, "{value}")?;
            }
            writeln!(f, "{row_text}")?;
        }

        if let Some(points) = instance.coordinates() {
            writeln!(f, "DISPLAY_DATA_SECTION")?;
            for (city, point) in instance.cities().zip(points) {
                writeln!(f, "{city} {} {}", point.x, point.y)?;
            }
        }
        writeln!(f, "EOF")
    }
}
