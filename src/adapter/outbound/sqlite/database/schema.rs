//! Diesel table definitions matching the session migrations.

diesel::table! {
    ticks (id) {
        id -> Nullable<Integer>,
        recorded_at -> Text,
        market_slug -> Text,
        up_token_id -> Text,
        down_token_id -> Text,
        reference_price -> Double,
        up_bid -> Nullable<Double>,
        up_ask -> Nullable<Double>,
        up_mid -> Double,
        down_bid -> Nullable<Double>,
        down_ask -> Nullable<Double>,
        down_mid -> Double,
        p_up_model -> Double,
        p_up_market -> Double,
        p_down_market -> Double,
        edge_up -> Double,
        edge_down -> Double,
        chosen_edge -> Double,
        decision -> Text,
        reason -> Text,
    }
}

diesel::table! {
    orders (id) {
        id -> Text,
        created_at -> Text,
        market_slug -> Text,
        mode -> Text,
        token_id -> Text,
        side -> Text,
        price -> Double,
        size -> Double,
        status -> Text,
        reason -> Text,
    }
}

diesel::table! {
    fills (id) {
        id -> Nullable<Integer>,
        order_id -> Text,
        filled_at -> Text,
        fill_price -> Double,
        fill_size -> Double,
    }
}

diesel::table! {
    positions (id) {
        id -> Nullable<Integer>,
        order_id -> Text,
        market_slug -> Text,
        token_id -> Text,
        outcome -> Text,
        quantity -> Double,
        entry_price -> Double,
        notional -> Double,
        opened_at -> Text,
        closed_at -> Nullable<Text>,
        exit_reason -> Nullable<Text>,
        exit_price -> Nullable<Double>,
        pnl -> Nullable<Double>,
    }
}

diesel::table! {
    pnl (id) {
        id -> Nullable<Integer>,
        recorded_at -> Text,
        realized -> Double,
        unrealized -> Double,
        exposure -> Double,
    }
}

diesel::table! {
    errors (id) {
        id -> Nullable<Integer>,
        recorded_at -> Text,
        source -> Text,
        message -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(ticks, orders, fills, positions, pnl, errors);
