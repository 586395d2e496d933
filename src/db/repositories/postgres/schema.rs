diesel::table! {
    shape_calculations (id) {
        id -> Int8,
        shape_type -> Text,
        parameters -> Jsonb,
        surface -> Float8,
        circumference -> Float8,
        calculated_at -> Timestamptz,
    }
}
