pub use crate::{
    add_comment::*, bootstrap_admins::*, change_password::*, register_citizen::*, submit_item::*,
    toggle_like::*, update_profile::*,
};
