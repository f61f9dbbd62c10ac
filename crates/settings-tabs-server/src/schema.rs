use settings_tabs_model::{Choice, FieldDescriptor, SchemaRegistry, SectionModel, TabModel};

/// The compiled-in settings schema: two fields-bearing tabs and one static
/// content tab. Display order here is navigation order.
#[must_use]
pub fn demo_schema(page_title: &str) -> SchemaRegistry {
    SchemaRegistry::build(
        page_title,
        vec![
            TabModel::with_fields(
                "default",
                "Default Settings",
                vec![
                    SectionModel::new(
                        "section_1",
                        "Section 1",
                        vec![
                            FieldDescriptor::text("name", "Text Box")
                                .with_size(15)
                                .with_help("Enter a name"),
                            FieldDescriptor::textarea("message", "Text Area", 5, 50)
                                .with_help("Write a message"),
                        ],
                    ),
                    SectionModel::new(
                        "section_2",
                        "Section 2",
                        vec![FieldDescriptor::select(
                            "color",
                            "Select",
                            vec![
                                Choice::new("red", "Red"),
                                Choice::new("yellow", "Yellow"),
                                Choice::new("blue", "Blue"),
                            ],
                        )
                        .with_help("Choose a color")],
                    ),
                ],
            ),
            TabModel::with_fields(
                "other",
                "Other Settings",
                vec![
                    SectionModel::new(
                        "section_3",
                        "Section 3",
                        vec![
                            FieldDescriptor::checkbox(
                                "subscribe",
                                "Checkbox",
                                "Subscribe me to your newsletter",
                            ),
                            FieldDescriptor::checkbox_array(
                                "roles",
                                "Checkbox Array",
                                vec![
                                    Choice::new("administrator", "Administrator"),
                                    Choice::new("editor", "Editor"),
                                    Choice::new("author", "Author"),
                                    Choice::new("contributor", "Contributor"),
                                ],
                            )
                            .with_help("Plugin may be used by:"),
                        ],
                    ),
                    SectionModel::new(
                        "section_4",
                        "Section 4",
                        vec![FieldDescriptor::radio(
                            "gender",
                            "Radio Button Set",
                            vec![Choice::new("m", "Male"), Choice::new("f", "Female")],
                        )
                        .with_help("Gender:")],
                    ),
                ],
            ),
            TabModel::static_tab("instructions", "Instructions"),
        ],
    )
}
