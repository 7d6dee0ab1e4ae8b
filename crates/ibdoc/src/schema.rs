//! Typed attribute records for the Interface Builder element kinds
//!
//! Each record knows its tag and turns into an [`Element`] with attributes
//! in a fixed order. Optional fields are omitted from the output when unset.

use std::fmt;
use std::str::FromStr;

use crate::color::CustomColor;
use crate::error::{Error, ErrorKind, Result};
use crate::id::constraint_id;
use crate::tree::Element;

/// Element kinds with a fixed attribute schema
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Document,
    Scene,
    ViewController,
    Placeholder,
    View,
    ImageView,
    Label,
    Constraint,
    Color,
    Nil,
    Rect,
    AutoresizingMask,
    FontDescription,
    ViewLayoutGuide,
    ResourceImage,
    StackView,
    Button,
    State,
    ButtonConfiguration,
    ActivityIndicatorView,
}

impl ElementKind {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Scene => "scene",
            Self::ViewController => "viewController",
            Self::Placeholder => "placeholder",
            Self::View => "view",
            Self::ImageView => "imageView",
            Self::Label => "label",
            Self::Constraint => "constraint",
            Self::Color => "color",
            Self::Nil => "nil",
            Self::Rect => "rect",
            Self::AutoresizingMask => "autoresizingMask",
            Self::FontDescription => "fontDescription",
            Self::ViewLayoutGuide => "viewLayoutGuide",
            Self::ResourceImage => "image",
            Self::StackView => "stackView",
            Self::Button => "button",
            Self::State => "state",
            Self::ButtonConfiguration => "buttonConfiguration",
            Self::ActivityIndicatorView => "activityIndicatorView",
        }
    }
}

/// Conversion of a typed record into a tree element
pub trait IntoElement {
    fn kind(&self) -> ElementKind;

    fn into_element(self) -> Element;

    /// Tag and element, ready for [`Element::push_child`]
    fn into_tagged(self) -> (&'static str, Element)
    where
        Self: Sized,
    {
        let tag = self.kind().tag();
        (tag, self.into_element())
    }
}

macro_rules! string_enum {
    ($(#[$meta:meta])* $name:ident, $label:literal { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                match s {
                    $($wire => Ok(Self::$variant),)+
                    _ => Err(Error::detached(ErrorKind::UnknownVariant {
                        kind: $label,
                        value: s.to_string(),
                    })),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_enum!(
    /// How an image is laid out inside its frame
    ContentMode, "content mode" {
        ScaleToFill => "scaleToFill",
        ScaleAspectFit => "scaleAspectFit",
        ScaleAspectFill => "scaleAspectFill",
        Redraw => "redraw",
        Center => "center",
        Top => "top",
        Bottom => "bottom",
        Left => "left",
        Right => "right",
        // The only capitalized value in the vocabulary
        TopLeft => "TopLeft",
        TopRight => "topRight",
        BottomLeft => "bottomLeft",
        BottomRight => "bottomRight",
    }
);

string_enum!(
    /// Anchor of a layout constraint
    ConstraintAttribute, "constraint attribute" {
        Top => "top",
        Bottom => "bottom",
        Leading => "leading",
        Trailing => "trailing",
        Width => "width",
        Height => "height",
        CenterX => "centerX",
        CenterY => "centerY",
    }
);

string_enum!(
    LineBreakMode, "line break mode" {
        Clip => "clip",
        CharacterWrap => "characterWrap",
        WordWrap => "wordWrap",
        HeadTruncation => "headTruncation",
        MiddleTruncation => "middleTruncation",
        TailTruncation => "tailTruncation",
    }
);

string_enum!(
    TextAlignment, "text alignment" {
        Left => "left",
        Center => "center",
        Right => "right",
        Justified => "justified",
        Natural => "natural",
    }
);

string_enum!(
    /// Direction a stack view lays out its arranged subviews
    Axis, "axis" {
        Horizontal => "horizontal",
        Vertical => "vertical",
    }
);

string_enum!(
    StackAlignment, "stack alignment" {
        Fill => "fill",
        Top => "top",
        Center => "center",
        Bottom => "bottom",
        Leading => "leading",
        Trailing => "trailing",
        FirstBaseline => "firstBaseline",
        LastBaseline => "lastBaseline",
    }
);

string_enum!(
    StackDistribution, "stack distribution" {
        Fill => "fill",
        FillEqually => "fillEqually",
        FillProportionally => "fillProportionally",
        EqualSpacing => "equalSpacing",
        EqualCentering => "equalCentering",
    }
);

string_enum!(
    ActivityIndicatorStyle, "activity indicator style" {
        Medium => "medium",
        Large => "large",
    }
);

/// `<rect key=.. x=.. y=.. width=.. height=../>`
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    pub key: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Frame rect at the origin
    pub fn frame(width: f64, height: f64) -> Self {
        Self {
            key: "frame".to_string(),
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }
}

impl IntoElement for Rect {
    fn kind(&self) -> ElementKind {
        ElementKind::Rect
    }

    fn into_element(self) -> Element {
        Element::new()
            .with_attr("key", self.key)
            .with_attr("x", self.x)
            .with_attr("y", self.y)
            .with_attr("width", self.width)
            .with_attr("height", self.height)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutoresizingMask {
    pub key: String,
    pub flexible_max_x: Option<bool>,
    pub flexible_max_y: Option<bool>,
    pub flexible_min_x: Option<bool>,
    pub flexible_min_y: Option<bool>,
    pub width_sizable: Option<bool>,
}

impl AutoresizingMask {
    /// `autoresizingMask` pinned to the top-left corner
    pub fn flexible_max() -> Self {
        Self {
            key: "autoresizingMask".to_string(),
            flexible_max_x: Some(true),
            flexible_max_y: Some(true),
            ..Self::default()
        }
    }
}

impl IntoElement for AutoresizingMask {
    fn kind(&self) -> ElementKind {
        ElementKind::AutoresizingMask
    }

    fn into_element(self) -> Element {
        Element::new()
            .with_attr("key", self.key)
            .with_opt_attr("flexibleMaxX", self.flexible_max_x)
            .with_opt_attr("flexibleMaxY", self.flexible_max_y)
            .with_opt_attr("flexibleMinX", self.flexible_min_x)
            .with_opt_attr("flexibleMinY", self.flexible_min_y)
            .with_opt_attr("widthSizable", self.width_sizable)
    }
}

/// `<color>` keyed by the slot it fills (`backgroundColor`, `textColor`, ..)
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    Custom { key: String, color: CustomColor },
    System { key: String, name: String },
}

impl Color {
    pub fn key(&self) -> &str {
        match self {
            Self::Custom { key, .. } | Self::System { key, .. } => key,
        }
    }
}

impl IntoElement for Color {
    fn kind(&self) -> ElementKind {
        ElementKind::Color
    }

    fn into_element(self) -> Element {
        match self {
            Self::Custom { key, color } => Element::new()
                .with_attr("key", key)
                .with_attr("red", color.red)
                .with_attr("green", color.green)
                .with_attr("blue", color.blue)
                .with_attr("alpha", color.alpha)
                .with_attr("colorSpace", "custom")
                .with_attr("customColorSpace", "sRGB"),
            Self::System { key, name } => Element::new()
                .with_attr("key", key)
                .with_attr("systemColor", name),
        }
    }
}

/// Explicitly unset color slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nil {
    pub key: String,
}

impl IntoElement for Nil {
    fn kind(&self) -> ElementKind {
        ElementKind::Nil
    }

    fn into_element(self) -> Element {
        Element::new().with_attr("key", self.key)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FontDescription {
    pub key: String,
    pub point_size: f64,
    /// Built-in font style such as `system` or `boldSystem`
    pub style: Option<String>,
    pub name: Option<String>,
    pub family: Option<String>,
}

impl FontDescription {
    pub fn system(point_size: f64) -> Self {
        Self {
            key: "fontDescription".to_string(),
            point_size,
            style: Some("system".to_string()),
            name: None,
            family: None,
        }
    }
}

impl IntoElement for FontDescription {
    fn kind(&self) -> ElementKind {
        ElementKind::FontDescription
    }

    fn into_element(self) -> Element {
        Element::new()
            .with_attr("key", self.key)
            .with_opt_attr("type", self.style)
            .with_opt_attr("name", self.name)
            .with_opt_attr("family", self.family)
            .with_attr("pointSize", self.point_size)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewLayoutGuide {
    pub key: String,
    pub id: String,
}

impl IntoElement for ViewLayoutGuide {
    fn kind(&self) -> ElementKind {
        ElementKind::ViewLayoutGuide
    }

    fn into_element(self) -> Element {
        Element::new()
            .with_attr("key", self.key)
            .with_attr("id", self.id)
    }
}

/// Layout constraint between two anchors.
///
/// Without an explicit id the id is derived from the two anchors, so the
/// same constraint always gets the same id.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    pub first_item: String,
    pub first_attribute: ConstraintAttribute,
    pub second_item: String,
    pub second_attribute: ConstraintAttribute,
    pub constant: Option<f64>,
    pub id: Option<String>,
}

impl Constraint {
    pub fn new(
        (first_item, first_attribute): (&str, ConstraintAttribute),
        (second_item, second_attribute): (&str, ConstraintAttribute),
    ) -> Self {
        Self {
            first_item: first_item.to_string(),
            first_attribute,
            second_item: second_item.to_string(),
            second_attribute,
            constant: None,
            id: None,
        }
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = Some(constant);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Explicit id, or the one derived from both anchors
    pub fn id(&self) -> String {
        self.id.clone().unwrap_or_else(|| {
            constraint_id(
                &self.first_item,
                self.first_attribute.as_str(),
                &self.second_item,
                self.second_attribute.as_str(),
            )
        })
    }
}

impl IntoElement for Constraint {
    fn kind(&self) -> ElementKind {
        ElementKind::Constraint
    }

    fn into_element(self) -> Element {
        let id = self.id();
        Element::new()
            .with_attr("firstItem", self.first_item)
            .with_attr("firstAttribute", self.first_attribute.as_str())
            .with_attr("secondItem", self.second_item)
            .with_attr("secondAttribute", self.second_attribute.as_str())
            .with_opt_attr("constant", self.constant)
            .with_attr("id", id)
    }
}

/// Constraints pinning `child` to all four edges of `parent`
pub fn absolute_constraints(child: &str, parent: &str) -> [Constraint; 4] {
    use ConstraintAttribute::{Bottom, Leading, Top, Trailing};
    [Top, Leading, Trailing, Bottom].map(|edge| Constraint::new((child, edge), (parent, edge)))
}

/// Entry of the document `resources` list
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceImage {
    pub name: String,
    pub width: f64,
    pub height: f64,
}

impl IntoElement for ResourceImage {
    fn kind(&self) -> ElementKind {
        ElementKind::ResourceImage
    }

    fn into_element(self) -> Element {
        Element::new()
            .with_attr("name", self.name)
            .with_attr("width", self.width)
            .with_attr("height", self.height)
    }
}

/// Attributes shared by every view kind
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewAttributes {
    pub id: String,
    pub user_label: Option<String>,
    pub content_mode: Option<ContentMode>,
    pub horizontal_hugging_priority: Option<u32>,
    pub vertical_hugging_priority: Option<u32>,
    pub fixed_frame: Option<bool>,
    pub hidden: Option<bool>,
    pub opaque: Option<bool>,
    pub clips_subviews: Option<bool>,
    pub user_interaction_enabled: Option<bool>,
    pub insets_layout_margins_from_safe_area: Option<bool>,
    pub translates_autoresizing_mask_into_constraints: Option<bool>,
}

impl ViewAttributes {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    fn apply(self, element: Element) -> Element {
        element
            .with_attr("id", self.id)
            .with_opt_attr("userLabel", self.user_label)
            .with_opt_attr("contentMode", self.content_mode.map(ContentMode::as_str))
            .with_opt_attr("horizontalHuggingPriority", self.horizontal_hugging_priority)
            .with_opt_attr("verticalHuggingPriority", self.vertical_hugging_priority)
            .with_opt_attr("fixedFrame", self.fixed_frame)
            .with_opt_attr("hidden", self.hidden)
            .with_opt_attr("opaque", self.opaque)
            .with_opt_attr("clipsSubviews", self.clips_subviews)
            .with_opt_attr("userInteractionEnabled", self.user_interaction_enabled)
            .with_opt_attr(
                "insetsLayoutMarginsFromSafeArea",
                self.insets_layout_margins_from_safe_area,
            )
            .with_opt_attr(
                "translatesAutoresizingMaskIntoConstraints",
                self.translates_autoresizing_mask_into_constraints,
            )
    }
}

fn push_record<R: IntoElement>(element: &mut Element, record: R) {
    let (tag, child) = record.into_tagged();
    element.push_child(tag, child);
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageView {
    pub image: String,
    pub attributes: ViewAttributes,
    pub frame: Option<Rect>,
    pub background_color: Option<Color>,
}

impl IntoElement for ImageView {
    fn kind(&self) -> ElementKind {
        ElementKind::ImageView
    }

    fn into_element(self) -> Element {
        let mut element = self.attributes.apply(Element::new().with_attr("image", self.image));
        if let Some(frame) = self.frame {
            push_record(&mut element, frame);
        }
        if let Some(color) = self.background_color {
            push_record(&mut element, color);
        }
        element
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub attributes: ViewAttributes,
    pub text_alignment: Option<TextAlignment>,
    pub line_break_mode: Option<LineBreakMode>,
    pub adjusts_font_size_to_fit: Option<bool>,
    pub frame: Option<Rect>,
    pub autoresizing_mask: Option<AutoresizingMask>,
    pub font: Option<FontDescription>,
    pub text_color: Option<Color>,
}

impl IntoElement for Label {
    fn kind(&self) -> ElementKind {
        ElementKind::Label
    }

    fn into_element(self) -> Element {
        let mut element = self
            .attributes
            .apply(Element::new())
            .with_attr("text", self.text)
            .with_opt_attr("textAlignment", self.text_alignment.map(TextAlignment::as_str))
            .with_opt_attr("lineBreakMode", self.line_break_mode.map(LineBreakMode::as_str))
            .with_opt_attr("adjustsFontSizeToFit", self.adjusts_font_size_to_fit);
        if let Some(frame) = self.frame {
            push_record(&mut element, frame);
        }
        if let Some(mask) = self.autoresizing_mask {
            push_record(&mut element, mask);
        }
        if let Some(font) = self.font {
            push_record(&mut element, font);
        }
        if let Some(color) = self.text_color {
            push_record(&mut element, color);
        }
        element
    }
}

/// Stack view; arranged subviews go in `subviews` like a plain view
#[derive(Clone, Debug, PartialEq)]
pub struct StackView {
    pub key: Option<String>,
    pub attributes: ViewAttributes,
    pub axis: Option<Axis>,
    pub alignment: Option<StackAlignment>,
    pub distribution: Option<StackDistribution>,
    pub spacing: Option<f64>,
    pub baseline_relative_arrangement: Option<bool>,
    pub frame: Option<Rect>,
    pub autoresizing_mask: Option<AutoresizingMask>,
    pub subviews: Vec<Record>,
    pub background_color: Option<Color>,
}

impl StackView {
    /// Empty vertical stack
    pub fn vertical(id: impl Into<String>) -> Self {
        Self {
            key: None,
            attributes: ViewAttributes::new(id),
            axis: Some(Axis::Vertical),
            alignment: None,
            distribution: None,
            spacing: None,
            baseline_relative_arrangement: None,
            frame: None,
            autoresizing_mask: None,
            subviews: Vec::new(),
            background_color: None,
        }
    }
}

impl IntoElement for StackView {
    fn kind(&self) -> ElementKind {
        ElementKind::StackView
    }

    fn into_element(self) -> Element {
        let mut element = self
            .attributes
            .apply(Element::new().with_opt_attr("key", self.key))
            .with_opt_attr("axis", self.axis.map(Axis::as_str))
            .with_opt_attr("alignment", self.alignment.map(StackAlignment::as_str))
            .with_opt_attr("distribution", self.distribution.map(StackDistribution::as_str))
            .with_opt_attr("spacing", self.spacing)
            .with_opt_attr("baselineRelativeArrangement", self.baseline_relative_arrangement);
        if let Some(frame) = self.frame {
            push_record(&mut element, frame);
        }
        if let Some(mask) = self.autoresizing_mask {
            push_record(&mut element, mask);
        }
        if !self.subviews.is_empty() {
            let mut subviews = Element::new();
            for record in self.subviews {
                push_record(&mut subviews, record);
            }
            element.push_child("subviews", subviews);
        }
        if let Some(color) = self.background_color {
            push_record(&mut element, color);
        }
        element
    }
}

/// Title for one control state, e.g. `<state key="normal" title=".."/>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub key: String,
    pub title: Option<String>,
}

impl State {
    pub fn normal(title: impl Into<String>) -> Self {
        Self {
            key: "normal".to_string(),
            title: Some(title.into()),
        }
    }
}

impl IntoElement for State {
    fn kind(&self) -> ElementKind {
        ElementKind::State
    }

    fn into_element(self) -> Element {
        Element::new()
            .with_attr("key", self.key)
            .with_opt_attr("title", self.title)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonConfiguration {
    pub key: String,
    pub style: String,
    pub title: Option<String>,
    pub corner_style: Option<String>,
}

impl ButtonConfiguration {
    /// `plain` configuration with a title
    pub fn plain(title: impl Into<String>) -> Self {
        Self {
            key: "configuration".to_string(),
            style: "plain".to_string(),
            title: Some(title.into()),
            corner_style: None,
        }
    }
}

impl IntoElement for ButtonConfiguration {
    fn kind(&self) -> ElementKind {
        ElementKind::ButtonConfiguration
    }

    fn into_element(self) -> Element {
        Element::new()
            .with_attr("key", self.key)
            .with_attr("style", self.style)
            .with_opt_attr("title", self.title)
            .with_opt_attr("cornerStyle", self.corner_style)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    pub attributes: ViewAttributes,
    pub button_type: String,
    pub content_horizontal_alignment: Option<String>,
    pub content_vertical_alignment: Option<String>,
    pub line_break_mode: Option<LineBreakMode>,
    pub highlighted: Option<bool>,
    pub selected: Option<bool>,
    pub frame: Option<Rect>,
    pub autoresizing_mask: Option<AutoresizingMask>,
    pub states: Vec<State>,
    pub configuration: Option<ButtonConfiguration>,
}

impl Button {
    /// Centered system button
    pub fn system(id: impl Into<String>) -> Self {
        Self {
            attributes: ViewAttributes::new(id),
            button_type: "system".to_string(),
            content_horizontal_alignment: Some("center".to_string()),
            content_vertical_alignment: Some("center".to_string()),
            line_break_mode: None,
            highlighted: None,
            selected: None,
            frame: None,
            autoresizing_mask: None,
            states: Vec::new(),
            configuration: None,
        }
    }
}

impl IntoElement for Button {
    fn kind(&self) -> ElementKind {
        ElementKind::Button
    }

    fn into_element(self) -> Element {
        let mut element = self
            .attributes
            .apply(Element::new())
            .with_opt_attr("contentHorizontalAlignment", self.content_horizontal_alignment)
            .with_opt_attr("contentVerticalAlignment", self.content_vertical_alignment)
            .with_attr("buttonType", self.button_type)
            .with_opt_attr("lineBreakMode", self.line_break_mode.map(LineBreakMode::as_str))
            .with_opt_attr("highlighted", self.highlighted)
            .with_opt_attr("selected", self.selected);
        if let Some(frame) = self.frame {
            push_record(&mut element, frame);
        }
        if let Some(mask) = self.autoresizing_mask {
            push_record(&mut element, mask);
        }
        for state in self.states {
            push_record(&mut element, state);
        }
        if let Some(configuration) = self.configuration {
            push_record(&mut element, configuration);
        }
        element
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActivityIndicatorView {
    pub attributes: ViewAttributes,
    pub style: ActivityIndicatorStyle,
    pub tag: Option<i32>,
    pub hides_when_stopped: Option<bool>,
    pub animating: Option<bool>,
    pub frame: Option<Rect>,
    pub autoresizing_mask: Option<AutoresizingMask>,
    /// `color`, `tintColor` and `backgroundColor` slots
    pub colors: Vec<Color>,
}

impl IntoElement for ActivityIndicatorView {
    fn kind(&self) -> ElementKind {
        ElementKind::ActivityIndicatorView
    }

    fn into_element(self) -> Element {
        let mut element = self
            .attributes
            .apply(Element::new().with_opt_attr("tag", self.tag))
            .with_opt_attr("hidesWhenStopped", self.hides_when_stopped)
            .with_opt_attr("animating", self.animating)
            .with_attr("style", self.style.as_str());
        if let Some(frame) = self.frame {
            push_record(&mut element, frame);
        }
        if let Some(mask) = self.autoresizing_mask {
            push_record(&mut element, mask);
        }
        for color in self.colors {
            push_record(&mut element, color);
        }
        element
    }
}

/// Container view; `subviews` may hold any record kind
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub key: Option<String>,
    pub attributes: ViewAttributes,
    pub frame: Option<Rect>,
    pub autoresizing_mask: Option<AutoresizingMask>,
    pub subviews: Vec<Record>,
    pub background_color: Option<Color>,
    pub constraints: Vec<Constraint>,
    pub safe_area: Option<ViewLayoutGuide>,
}

impl IntoElement for View {
    fn kind(&self) -> ElementKind {
        ElementKind::View
    }

    fn into_element(self) -> Element {
        let mut element = self
            .attributes
            .apply(Element::new().with_opt_attr("key", self.key));
        if let Some(frame) = self.frame {
            push_record(&mut element, frame);
        }
        if let Some(mask) = self.autoresizing_mask {
            push_record(&mut element, mask);
        }
        if !self.subviews.is_empty() {
            let mut subviews = Element::new();
            for record in self.subviews {
                push_record(&mut subviews, record);
            }
            element.push_child("subviews", subviews);
        }
        if let Some(color) = self.background_color {
            push_record(&mut element, color);
        }
        if !self.constraints.is_empty() {
            let mut constraints = Element::new();
            for constraint in self.constraints {
                push_record(&mut constraints, constraint);
            }
            element.push_child("constraints", constraints);
        }
        if let Some(guide) = self.safe_area {
            push_record(&mut element, guide);
        }
        element
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placeholder {
    pub id: String,
    pub placeholder_identifier: Option<String>,
    pub user_label: String,
    pub scene_member_id: String,
}

impl Placeholder {
    /// The `First Responder` placeholder every scene carries
    pub fn first_responder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            placeholder_identifier: Some("IBFirstResponder".to_string()),
            user_label: "First Responder".to_string(),
            scene_member_id: "firstResponder".to_string(),
        }
    }
}

impl IntoElement for Placeholder {
    fn kind(&self) -> ElementKind {
        ElementKind::Placeholder
    }

    fn into_element(self) -> Element {
        Element::new()
            .with_opt_attr("placeholderIdentifier", self.placeholder_identifier)
            .with_attr("id", self.id)
            .with_attr("userLabel", self.user_label)
            .with_attr("sceneMemberID", self.scene_member_id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewController {
    pub id: String,
    pub storyboard_identifier: Option<String>,
    pub scene_member_id: String,
    pub view: View,
}

impl IntoElement for ViewController {
    fn kind(&self) -> ElementKind {
        ElementKind::ViewController
    }

    fn into_element(self) -> Element {
        let element = Element::new()
            .with_opt_attr("storyboardIdentifier", self.storyboard_identifier)
            .with_attr("id", self.id)
            .with_attr("sceneMemberID", self.scene_member_id);
        let (tag, view) = self.view.into_tagged();
        element.with_child(tag, view)
    }
}

/// Scene; its objects are the view controller followed by placeholders
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub scene_id: String,
    pub view_controller: ViewController,
    pub placeholders: Vec<Placeholder>,
}

impl IntoElement for Scene {
    fn kind(&self) -> ElementKind {
        ElementKind::Scene
    }

    fn into_element(self) -> Element {
        let mut objects = Element::new();
        push_record(&mut objects, self.view_controller);
        for placeholder in self.placeholders {
            push_record(&mut objects, placeholder);
        }
        Element::new()
            .with_attr("sceneID", self.scene_id)
            .with_child("objects", objects)
    }
}

/// Root `<document>` attributes
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentAttributes {
    pub document_type: String,
    pub version: String,
    pub tools_version: u32,
    pub target_runtime: String,
    pub property_access_control: String,
    pub use_autolayout: bool,
    pub launch_screen: bool,
    pub use_trait_collections: bool,
    pub use_safe_areas: bool,
    pub color_matched: bool,
    pub initial_view_controller: String,
}

impl Default for DocumentAttributes {
    fn default() -> Self {
        Self {
            document_type: "com.apple.InterfaceBuilder3.CocoaTouch.Storyboard.XIB".to_string(),
            version: "3.0".to_string(),
            tools_version: 16096,
            target_runtime: "iOS.CocoaTouch".to_string(),
            property_access_control: "none".to_string(),
            use_autolayout: true,
            launch_screen: true,
            use_trait_collections: true,
            use_safe_areas: true,
            color_matched: true,
            initial_view_controller: "EXPO-VIEWCONTROLLER-1".to_string(),
        }
    }
}

impl IntoElement for DocumentAttributes {
    fn kind(&self) -> ElementKind {
        ElementKind::Document
    }

    fn into_element(self) -> Element {
        Element::new()
            .with_attr("type", self.document_type)
            .with_attr("version", self.version)
            .with_attr("toolsVersion", self.tools_version)
            .with_attr("targetRuntime", self.target_runtime)
            .with_attr("propertyAccessControl", self.property_access_control)
            .with_attr("useAutolayout", self.use_autolayout)
            .with_attr("launchScreen", self.launch_screen)
            .with_attr("useTraitCollections", self.use_trait_collections)
            .with_attr("useSafeAreas", self.use_safe_areas)
            .with_attr("colorMatched", self.color_matched)
            .with_attr("initialViewController", self.initial_view_controller)
    }
}

/// Any record, tagged by kind
#[derive(Clone, Debug, PartialEq)]
pub enum Record {
    View(View),
    ImageView(ImageView),
    Label(Label),
    Constraint(Constraint),
    Color(Color),
    Nil(Nil),
    Rect(Rect),
    AutoresizingMask(AutoresizingMask),
    FontDescription(FontDescription),
    ViewLayoutGuide(ViewLayoutGuide),
    Placeholder(Placeholder),
    ResourceImage(ResourceImage),
    StackView(StackView),
    Button(Button),
    State(State),
    ButtonConfiguration(ButtonConfiguration),
    ActivityIndicatorView(ActivityIndicatorView),
}

impl IntoElement for Record {
    fn kind(&self) -> ElementKind {
        match self {
            Self::View(r) => r.kind(),
            Self::ImageView(r) => r.kind(),
            Self::Label(r) => r.kind(),
            Self::Constraint(r) => r.kind(),
            Self::Color(r) => r.kind(),
            Self::Nil(r) => r.kind(),
            Self::Rect(r) => r.kind(),
            Self::AutoresizingMask(r) => r.kind(),
            Self::FontDescription(r) => r.kind(),
            Self::ViewLayoutGuide(r) => r.kind(),
            Self::Placeholder(r) => r.kind(),
            Self::ResourceImage(r) => r.kind(),
            Self::StackView(r) => r.kind(),
            Self::Button(r) => r.kind(),
            Self::State(r) => r.kind(),
            Self::ButtonConfiguration(r) => r.kind(),
            Self::ActivityIndicatorView(r) => r.kind(),
        }
    }

    fn into_element(self) -> Element {
        match self {
            Self::View(r) => r.into_element(),
            Self::ImageView(r) => r.into_element(),
            Self::Label(r) => r.into_element(),
            Self::Constraint(r) => r.into_element(),
            Self::Color(r) => r.into_element(),
            Self::Nil(r) => r.into_element(),
            Self::Rect(r) => r.into_element(),
            Self::AutoresizingMask(r) => r.into_element(),
            Self::FontDescription(r) => r.into_element(),
            Self::ViewLayoutGuide(r) => r.into_element(),
            Self::Placeholder(r) => r.into_element(),
            Self::ResourceImage(r) => r.into_element(),
            Self::StackView(r) => r.into_element(),
            Self::Button(r) => r.into_element(),
            Self::State(r) => r.into_element(),
            Self::ButtonConfiguration(r) => r.into_element(),
            Self::ActivityIndicatorView(r) => r.into_element(),
        }
    }
}

macro_rules! record_from {
    ($($variant:ident),+) => {
        $(impl From<$variant> for Record {
            fn from(value: $variant) -> Self {
                Self::$variant(value)
            }
        })+
    };
}

record_from!(
    View,
    ImageView,
    Label,
    Constraint,
    Color,
    Nil,
    Rect,
    AutoresizingMask,
    FontDescription,
    ViewLayoutGuide,
    Placeholder,
    ResourceImage,
    StackView,
    Button,
    State,
    ButtonConfiguration,
    ActivityIndicatorView
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Category;

    #[test]
    fn test_content_mode_wire_names() -> Result<()> {
        assert_eq!(ContentMode::TopLeft.as_str(), "TopLeft");
        assert_eq!("scaleAspectFit".parse::<ContentMode>()?, ContentMode::ScaleAspectFit);
        for mode in ContentMode::ALL {
            assert_eq!(mode.as_str().parse::<ContentMode>()?, *mode);
        }

        let err = "topLeft".parse::<ContentMode>().err();
        assert_eq!(err.map(|e| e.category()), Some(Category::InvalidArgument));
        Ok(())
    }

    #[test]
    fn test_constraint_derives_stable_id() {
        let constraint = Constraint::new(
            ("X", ConstraintAttribute::Top),
            ("Y", ConstraintAttribute::Top),
        );
        assert_eq!(constraint.id(), "53bd9992c560787e42115942fc54b663fdfe372f");

        let element = constraint.with_constant(8.0).into_element();
        let names: Vec<_> = element.attributes.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            ["firstItem", "firstAttribute", "secondItem", "secondAttribute", "constant", "id"]
        );
        assert!(element.attr_matches("constant", "8"));
    }

    #[test]
    fn test_explicit_constraint_id_wins() {
        let constraint = Constraint::new(
            ("a", ConstraintAttribute::Width),
            ("b", ConstraintAttribute::Width),
        )
        .with_id("1gX-mQ-vu6");
        assert!(constraint.into_element().attr_matches("id", "1gX-mQ-vu6"));
    }

    #[test]
    fn test_absolute_constraints_cover_four_edges() {
        let edges: Vec<_> = absolute_constraints("child", "parent")
            .iter()
            .map(|c| c.first_attribute.as_str())
            .collect();
        assert_eq!(edges, ["top", "leading", "trailing", "bottom"]);
    }

    #[test]
    fn test_image_view_omits_unset_attributes() {
        let view = ImageView {
            image: "Splash".to_string(),
            attributes: ViewAttributes {
                content_mode: Some(ContentMode::Center),
                user_interaction_enabled: Some(false),
                ..ViewAttributes::new("img")
            },
            frame: Some(Rect::frame(414.0, 736.0)),
            background_color: None,
        };
        let (tag, element) = view.into_tagged();

        assert_eq!(tag, "imageView");
        assert!(element.attr_matches("userInteractionEnabled", "NO"));
        assert!(element.attr("clipsSubviews").is_none());
        assert!(element
            .first_child("rect")
            .is_some_and(|r| r.attr_matches("height", "736")));
        assert!(element.children("color").is_empty());
    }

    #[test]
    fn test_view_groups_subviews_and_constraints() {
        let view = View {
            key: Some("view".to_string()),
            attributes: ViewAttributes::new("container"),
            frame: None,
            autoresizing_mask: Some(AutoresizingMask::flexible_max()),
            subviews: vec![
                Nil {
                    key: "a".to_string(),
                }
                .into(),
                ResourceImage {
                    name: "b".to_string(),
                    width: 1.0,
                    height: 1.0,
                }
                .into(),
            ],
            background_color: None,
            constraints: absolute_constraints("a", "container").to_vec(),
            safe_area: None,
        };
        let element = view.into_element();

        let subviews = element.first_child("subviews");
        assert_eq!(subviews.map(|s| s.children.len()), Some(2));
        let constraints = element.first_child("constraints");
        assert_eq!(constraints.map(|c| c.children("constraint").len()), Some(4));
        assert!(element
            .first_child("autoresizingMask")
            .is_some_and(|m| m.attr("widthSizable").is_none()));
    }

    #[test]
    fn test_label_with_font_and_text_color() {
        let label = Label {
            text: "Loading".to_string(),
            attributes: ViewAttributes {
                opaque: Some(false),
                fixed_frame: Some(true),
                ..ViewAttributes::new("label-1")
            },
            text_alignment: Some(TextAlignment::Center),
            line_break_mode: Some(LineBreakMode::TailTruncation),
            adjusts_font_size_to_fit: None,
            frame: Some(Rect::frame(120.0, 21.0)),
            autoresizing_mask: None,
            font: Some(FontDescription::system(17.0)),
            text_color: Some(Color::System {
                key: "textColor".to_string(),
                name: "linkColor".to_string(),
            }),
        };
        let (tag, element) = label.into_tagged();

        assert_eq!(tag, "label");
        assert!(element.attr_matches("text", "Loading"));
        assert!(element.attr_matches("textAlignment", "center"));
        assert!(element.attr_matches("lineBreakMode", "tailTruncation"));
        assert!(element.attr("adjustsFontSizeToFit").is_none());
        let font = element.first_child("fontDescription");
        assert!(font.is_some_and(|f| f.attr_matches("type", "system")
            && f.attr_matches("pointSize", "17")
            && f.attr("name").is_none()));
        assert!(element
            .first_child("color")
            .is_some_and(|c| c.attr_matches("key", "textColor")));
    }

    #[test]
    fn test_stack_view_nests_arranged_subviews() -> Result<()> {
        let mut stack = StackView::vertical("stack-1");
        stack.spacing = Some(8.0);
        stack.distribution = Some("fillEqually".parse()?);
        stack.autoresizing_mask = Some(AutoresizingMask::flexible_max());
        stack.subviews.push(Button::system("button-1").into());
        stack.subviews.push(StackView::vertical("stack-2").into());
        let (tag, element) = stack.into_tagged();

        assert_eq!(tag, "stackView");
        assert!(element.attr_matches("axis", "vertical"));
        assert!(element.attr_matches("distribution", "fillEqually"));
        assert!(element.attr_matches("spacing", "8"));
        assert!(element.attr("alignment").is_none());
        let subviews = element.first_child("subviews");
        assert_eq!(subviews.map(|s| s.children("button").len()), Some(1));
        assert_eq!(subviews.map(|s| s.children("stackView").len()), Some(1));
        assert!(element.first_child("autoresizingMask").is_some());

        assert!("diagonal".parse::<Axis>().is_err());
        Ok(())
    }

    #[test]
    fn test_button_states_and_configuration() {
        let mut button = Button::system("button-1");
        button.line_break_mode = Some(LineBreakMode::MiddleTruncation);
        button.states.push(State::normal("Retry"));
        button.configuration = Some(ButtonConfiguration::plain("Retry"));
        let element = button.into_element();

        let names: Vec<_> = element.attributes.keys().map(String::as_str).collect();
        assert_eq!(
            names,
            [
                "id",
                "contentHorizontalAlignment",
                "contentVerticalAlignment",
                "buttonType",
                "lineBreakMode"
            ]
        );
        assert!(element
            .first_child("state")
            .is_some_and(|s| s.attr_matches("key", "normal") && s.attr_matches("title", "Retry")));
        assert!(element.first_child("buttonConfiguration").is_some_and(|c| {
            c.attr_matches("style", "plain") && c.attr("cornerStyle").is_none()
        }));
    }

    #[test]
    fn test_activity_indicator_colors() {
        let indicator = ActivityIndicatorView {
            attributes: ViewAttributes::new("spinner"),
            style: ActivityIndicatorStyle::Large,
            tag: Some(3),
            hides_when_stopped: Some(true),
            animating: Some(true),
            frame: None,
            autoresizing_mask: None,
            colors: vec![
                Color::System {
                    key: "color".to_string(),
                    name: "linkColor".to_string(),
                },
                Color::Custom {
                    key: "backgroundColor".to_string(),
                    color: CustomColor::new(1.0, 1.0, 1.0, 0.0),
                },
            ],
        };
        let record = Record::from(indicator);
        assert_eq!(record.kind(), ElementKind::ActivityIndicatorView);

        let (tag, element) = record.into_tagged();
        assert_eq!(tag, "activityIndicatorView");
        assert!(element.attr_matches("style", "large"));
        assert!(element.attr_matches("tag", "3"));
        assert!(element.attr_matches("hidesWhenStopped", "YES"));
        assert_eq!(element.children("color").len(), 2);
    }
}
