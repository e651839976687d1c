//! Text step plot of channel floors and water heights.
//!
//! Each channel is a column. The solid part is the floor `alpha_i`, the
//! shaded part on top of it is the allocated power `x_i`, so the top of every
//! column sits at `alpha_i + x_i`.

const FLOOR: &str = "██";
const WATER: &str = "░░";
const EMPTY: &str = "  ";
const COLUMN_GAP: &str = " ";

/// Render a plot `height` rows tall.
///
/// `floors` and `powers` must have the same length.
#[must_use]
pub fn render(floors: &[f64], powers: &[f64], height: usize) -> String {
    let height = height.max(1);
    let top = floors
        .iter()
        .zip(powers)
        .map(|(a, x)| a + x)
        .fold(0.0_f64, f64::max);
    if top <= 0.0 {
        return String::new();
    }

    let mut out = String::new();
    for row in (1..=height).rev() {
        // A cell is filled when the column reaches the middle of the row.
        let y = top * (row as f64 - 0.5) / height as f64;
        out.push_str(&format!("{:>7.3} │", top * row as f64 / height as f64));
        for (a, x) in floors.iter().zip(powers) {
            let cell = if *a >= y {
                FLOOR
            } else if a + x >= y {
                WATER
            } else {
                EMPTY
            };
            out.push_str(COLUMN_GAP);
            out.push_str(cell);
        }
        out.push('\n');
    }

    out.push_str(&format!("{:>7} └", ""));
    for _ in floors {
        out.push_str("───");
    }
    out.push('\n');

    out.push_str(&format!("{:>7}  ", ""));
    for i in 0..floors.len() {
        out.push_str(&format!("{:>3}", i % 1000));
    }
    out.push('\n');

    out.push_str(&format!("{:>7}  {FLOOR} floor (alpha)  {WATER} power (x)", ""));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_one_row_per_height_unit_plus_axes() {
        let plot = render(&[0.8, 1.0, 1.2], &[0.533, 0.333, 0.133], 8);
        // 8 plot rows, axis, index row, legend.
        assert_eq!(plot.lines().count(), 11);
        assert!(plot.contains(FLOOR));
        assert!(plot.contains(WATER));
        assert!(plot.lines().next().unwrap().trim_start().starts_with("1.333"));
    }

    #[test]
    fn test_equal_levels_fill_top_row_everywhere() {
        let plot = render(&[0.5, 1.0], &[0.5, 0.0], 4);
        let top_row = plot.lines().next().unwrap();
        assert_eq!(top_row.matches(FLOOR).count() + top_row.matches(WATER).count(), 2);
    }

    #[test]
    fn test_zero_height_columns_render_nothing() {
        assert!(render(&[], &[], 5).is_empty());
    }
}
