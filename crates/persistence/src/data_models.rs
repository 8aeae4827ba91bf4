// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// Serializable representation of an Actor, stored as JSON in the
/// `changed_by_json` history column. `NULL` means a system-initiated change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Type alias for reservation row data from `SQLite`.
pub type ReservationRow = (
    i64,            // reservation_id
    i64,            // user_id
    String,         // guest_name
    String,         // phone_number
    String,         // email
    i64,            // arrival_time (unix seconds)
    i64,            // table_size
    String,         // status
    Option<String>, // special_requests
    Option<String>, // cancellation_reason
    i64,            // created_at (unix seconds)
    i64,            // updated_at (unix seconds)
);

/// Type alias for status history row data from `SQLite`.
pub type StatusChangeRow = (
    String,         // status
    Option<String>, // reason
    i64,            // changed_at (unix seconds)
    Option<String>, // changed_by_json
);
