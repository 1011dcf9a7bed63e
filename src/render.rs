use crossterm::style::{style, Color, Stylize};
use std::fmt;

use super::board::{Board, Point};
use super::interaction::column_label;
use super::tile::{Adjacency, Tile};

fn number_color(n: u8) -> Color {
    match n {
        1 => Color::DarkBlue,
        2 => Color::Green,
        3 => Color::Red,
        4 => Color::DarkMagenta,
        5 => Color::DarkRed,
        6 => Color::DarkCyan,
        7 => Color::DarkGrey,
        _ => Color::Grey
    }
}

fn colored_tile(board: &Board, tile: &Tile) -> String {
    let point = Point(tile.x(), tile.y());
    let content = style(tile.to_char());
    if point == board.cursor() {
        return content.reverse().to_string()
    }
    if tile.is_wrong_flag() {
        return content.on(Color::Red).to_string()
    }
    if tile.is_flagged() || (tile.is_exposed() && tile.is_mine()) {
        return content.on(Color::DarkRed).to_string()
    }
    match (tile.is_exposed(), tile.adjacency()) {
        (true, Adjacency::Count(n)) if n > 0 => {
            let content = content.with(number_color(n));
            if board.covered_neighbor_count(&point) == 0 {
                content.dim().to_string()
            } else {
                content.to_string()
            }
        }
        _ => content.to_string()
    }
}

fn plain_tile(_board: &Board, tile: &Tile) -> String {
    tile.to_char().to_string()
}

/// Lays the board out with column letters on top, 1-based row numbers down
/// the side and a border around the tiles.
fn draw<F>(board: &Board, draw_tile: F) -> String
    where F: Fn(&Board, &Tile) -> String
{
    let cell_width = column_label(board.width().saturating_sub(1)).len();
    let label_width = board.height().to_string().len().max(2);
    let border = format!("{}+-{}+\n", " ".repeat(label_width), "-".repeat((cell_width + 1) * board.width()));

    let mut result = " ".repeat(label_width + 2);
    for x in 0..board.width() {
        result += &format!("{:<width$} ", column_label(x), width = cell_width);
    }
    result = result.trim_end().to_owned();
    result += "\n";
    result += &border;
    for (y, row) in board.rows().enumerate() {
        result += &format!("{:>width$}| ", y + 1, width = label_width);
        for tile in row {
            result += &draw_tile(board, tile);
            result += &" ".repeat(cell_width);
        }
        result += "|\n";
    }
    result += &border;
    result
}

pub fn render_colored(board: &Board) -> String {
    draw(board, colored_tile)
}

pub fn status_line(board: &Board) -> String {
    format!("Mines: {}  Flags left: {}  Exposed: {}/{}",
            board.mine_count(), board.remaining_flags(),
            board.exposed_count().min(board.safe_tile_count()), board.safe_tile_count())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", draw(self, plain_tile))
    }
}

#[cfg(test)]
mod render_tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board() -> Board {
        Board::with_mines(3, 2, &[Point(2, 0)], StdRng::seed_from_u64(0)).unwrap()
    }

    #[test]
    fn plain_layout() {
        let mut board = board();
        board.flag_tile(&Point(2, 0)).unwrap();
        board.expose_tile(&Point(0, 0)).unwrap();
        let expected = concat!(
            "    A B C\n",
            "  +-------+\n",
            " 1|   1 ! |\n",
            " 2|   1 . |\n",
            "  +-------+\n",
        );
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn end_of_game_view_marks_mines() {
        let mut board = board();
        board.flag_tile(&Point(0, 1)).unwrap();
        board.expose_all();
        let rendered = board.to_string();
        assert!(rendered.contains(" 1|   1 * |"));
        assert!(rendered.contains(" 2| X 1 1 |"));
    }

    #[test]
    fn wide_boards_pad_cells() {
        let board = Board::with_mines(28, 1, &[], StdRng::seed_from_u64(0)).unwrap();
        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("    A  B "));
        assert!(lines[0].ends_with("AA AB"));
        assert_eq!(lines[1].len(), lines[2].len());
    }

    #[test]
    fn colored_uses_escape_codes() {
        let mut board = board();
        board.expose_tile(&Point(1, 1)).unwrap();
        board.set_cursor(&Point(0, 0)).unwrap();
        let rendered = render_colored(&board);
        assert!(rendered.contains('\u{1b}'));
        assert!(rendered.contains(&style('.').reverse().to_string()));
        assert!(rendered.contains(&style('1').with(Color::DarkBlue).to_string()));
    }

    #[test]
    fn status_counts() {
        let mut board = board();
        board.flag_tile(&Point(0, 0)).unwrap();
        board.expose_tile(&Point(1, 1)).unwrap();
        assert_eq!(status_line(&board), "Mines: 1  Flags left: 0  Exposed: 1/5");
    }
}
