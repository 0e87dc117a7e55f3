//! ID type wrappers for type safety.

mod id_macro;

use id_macro::string_id;

string_id!(
    /// Opaque identifier handed out by the auth provider.
    UserId
);

string_id!(
    /// Document id of a match listing.
    MatchId
);
