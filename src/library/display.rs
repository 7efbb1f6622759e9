/// Build the display line for a track: `Artist - Title`, or just the title
/// when the artist is blank.
pub fn display_name(title: &str, artist: &str) -> String {
    let title = title.trim();
    match artist.trim() {
        "" => title.to_string(),
        artist => format!("{} - {}", artist, title),
    }
}
