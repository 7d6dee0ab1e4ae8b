//! Default launch screen document

use crate::schema::{
    absolute_constraints, AutoresizingMask, Color, ContentMode, DocumentAttributes, ImageView,
    IntoElement, Placeholder, Rect, ResourceImage, Scene, View, ViewAttributes, ViewController,
    ViewLayoutGuide,
};
use crate::splash::{CONTAINER_VIEW_ID, IMAGE_HEIGHT, IMAGE_WIDTH};
use crate::tree::{Document, Element};

pub const SCENE_ID: &str = "EXPO-SCENE-1";
pub const VIEW_CONTROLLER_ID: &str = "EXPO-VIEWCONTROLLER-1";
pub const STORYBOARD_IDENTIFIER: &str = "SplashScreenViewController";
pub const PLACEHOLDER_ID: &str = "EXPO-PLACEHOLDER-1";
pub const SAFE_AREA_ID: &str = "EXPO-SafeArea";
pub const BACKGROUND_IMAGE_ID: &str = "EXPO-SplashScreenBackground";
/// Resource drawn behind the splash image
pub const BACKGROUND_IMAGE_NAME: &str = "SplashScreenBackground";

/// Ids Xcode assigned to the background constraints
const BACKGROUND_CONSTRAINT_IDS: [&str; 4] =
    ["1gX-mQ-vu6", "6tX-OG-Sck", "ABX-8g-7v4", "jkI-2V-eW5"];

/// Launch screen with a full-size background image and no splash image
pub fn launch_screen() -> Document {
    let (name, root) = DocumentAttributes::default().into_tagged();
    let root = root
        .with_child("dependencies", dependencies())
        .with_child("scenes", Element::new().with_child("scene", scene()))
        .with_child("resources", resources());
    Document::new(name, root)
}

fn dependencies() -> Element {
    let capability = |name: &str, min_tools: &str| {
        Element::new()
            .with_attr("name", name)
            .with_attr("minToolsVersion", min_tools)
    };
    Element::new()
        .with_child("deployment", Element::new().with_attr("identifier", "iOS"))
        .with_child(
            "plugIn",
            Element::new()
                .with_attr("identifier", "com.apple.InterfaceBuilder.IBCocoaTouchPlugin")
                .with_attr("version", "16087"),
        )
        .with_child("capability", capability("Safe area layout guides", "9.0"))
        .with_child(
            "capability",
            capability("documents saved in the Xcode 8 format", "8.0"),
        )
}

fn scene() -> Element {
    let background = ImageView {
        image: BACKGROUND_IMAGE_NAME.to_string(),
        attributes: ViewAttributes {
            user_label: Some(BACKGROUND_IMAGE_NAME.to_string()),
            content_mode: Some(ContentMode::ScaleAspectFill),
            horizontal_hugging_priority: Some(251),
            vertical_hugging_priority: Some(251),
            user_interaction_enabled: Some(false),
            insets_layout_margins_from_safe_area: Some(false),
            translates_autoresizing_mask_into_constraints: Some(false),
            ..ViewAttributes::new(BACKGROUND_IMAGE_ID)
        },
        frame: Some(Rect::frame(IMAGE_WIDTH, IMAGE_HEIGHT)),
        background_color: None,
    };

    let constraints = absolute_constraints(BACKGROUND_IMAGE_ID, CONTAINER_VIEW_ID)
        .into_iter()
        .zip(BACKGROUND_CONSTRAINT_IDS)
        .map(|(constraint, id)| constraint.with_id(id))
        .collect();

    let container = View {
        key: Some("view".to_string()),
        attributes: ViewAttributes {
            user_label: Some("ContainerView".to_string()),
            content_mode: Some(ContentMode::ScaleToFill),
            user_interaction_enabled: Some(false),
            insets_layout_margins_from_safe_area: Some(false),
            ..ViewAttributes::new(CONTAINER_VIEW_ID)
        },
        frame: Some(Rect::frame(IMAGE_WIDTH, IMAGE_HEIGHT)),
        autoresizing_mask: Some(AutoresizingMask::flexible_max()),
        subviews: vec![background.into()],
        background_color: Some(Color::System {
            key: "backgroundColor".to_string(),
            name: "systemBackgroundColor".to_string(),
        }),
        constraints,
        safe_area: Some(ViewLayoutGuide {
            key: "safeArea".to_string(),
            id: SAFE_AREA_ID.to_string(),
        }),
    };

    Scene {
        scene_id: SCENE_ID.to_string(),
        view_controller: ViewController {
            id: VIEW_CONTROLLER_ID.to_string(),
            storyboard_identifier: Some(STORYBOARD_IDENTIFIER.to_string()),
            scene_member_id: "viewController".to_string(),
            view: container,
        },
        placeholders: vec![Placeholder::first_responder(PLACEHOLDER_ID)],
    }
    .into_element()
}

fn resources() -> Element {
    let (tag, image) = ResourceImage {
        name: BACKGROUND_IMAGE_NAME.to_string(),
        width: 1.0,
        height: 1.0,
    }
    .into_tagged();
    Element::new().with_child(tag, image)
}
