//! Fixed reply texts. The transport layer sends these verbatim; nothing in
//! here is formatted at runtime.

pub const GREETING: &str = "\
Welcome to the shared music catalog!
Send your favourite tracks as audio files and they become available to
everyone, on any device.
To search the catalog, just type an artist name or a track title.";

pub const HELP: &str = "\
Type an artist name or a track title to search the catalog.

Searches are fuzzy by default. Double quotes narrow the results to an
exact phrase:
  \"summer of haze\"
Quote several terms to require all of them:
  \"aes dana\" \"haze\"";

pub const NOT_FOUND: &str = "\
Nothing in the catalog matches your search yet :/
You can fix that by sending us the tracks you love as audio files!";

pub const GOODBYE: &str = "Goodbye! We will miss you.";

pub const MISSING_TITLE: &str = "Sorry, but your track is missing a title.";

pub const STATS_UNAVAILABLE: &str = "Stats are not yet available";
