table! {
    users (id) {
        id -> BigInt,
        uid -> Text,
        email -> Text,
        password -> Text,
        role -> SmallInt,
        name -> Text,
        profession -> Text,
        bio -> Nullable<Text>,
        avatar_url -> Nullable<Text>,
        created_at -> BigInt,
    }
}

table! {
    items (id) {
        id -> BigInt,
        uid -> Text,
        kind -> SmallInt,
        author_uid -> Text,
        title -> Text,
        description -> Text,
        address -> Text,
        lat -> Nullable<Double>,
        lng -> Nullable<Double>,
        status -> SmallInt,
        created_at -> BigInt,
        occurrence -> Nullable<Text>,
        video_url -> Nullable<Text>,
        category -> Nullable<Text>,
        custom_category -> Nullable<Text>,
        products -> Nullable<Text>,
        services -> Nullable<Text>,
        contact -> Nullable<Text>,
    }
}

table! {
    item_image (parent_rowid, position) {
        parent_rowid -> BigInt,
        position -> SmallInt,
        url -> Text,
    }
}

table! {
    item_like (parent_rowid, user_uid) {
        parent_rowid -> BigInt,
        user_uid -> Text,
    }
}

table! {
    comments (id) {
        id -> BigInt,
        uid -> Text,
        item_rowid -> BigInt,
        author_uid -> Text,
        text -> Text,
        created_at -> BigInt,
    }
}

joinable!(item_image -> items (parent_rowid));
joinable!(item_like -> items (parent_rowid));
joinable!(comments -> items (item_rowid));

allow_tables_to_appear_in_same_query!(users, items, item_image, item_like, comments);
