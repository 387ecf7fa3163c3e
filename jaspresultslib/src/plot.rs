//! The plot result element.
//!
//! A plot does not draw anything itself. It records the path of an image
//! rendered elsewhere, the opaque serialized plot object it came from, and
//! the usual status, error and footnote annotations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::{Footnote, Status};
use crate::error::ResultsError;
use crate::output::html::{error_to_html, escape, footnotes_to_html, open_element};
use crate::output::text::{footnotes_to_text, header_to_text};
use crate::table::{snapshot::MISSING_TEXT, ErrorEntry};
use crate::Result;

/// Default width and height of a new plot, in pixels.
pub const DEFAULT_PLOT_SIZE: i32 = 320;

/// Error kind recorded when the image could not be written.
pub const IMAGE_WRITE_ERROR: &str = "Error during writeImage";

/// A plot result element.
#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    title: String,
    width: i32,
    height: i32,
    aspect_ratio: f64,
    file_path_png: String,
    status: Status,
    error: String,
    error_message: String,
    footnotes: Vec<Footnote>,
    plot_obj_serialized: String,
}

impl Default for Plot {
    fn default() -> Self {
        Self::new("")
    }
}

impl Plot {
    /// Create a plot without an image
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            width: DEFAULT_PLOT_SIZE,
            height: DEFAULT_PLOT_SIZE,
            aspect_ratio: 0.0,
            file_path_png: String::new(),
            status: Status::default(),
            error: String::new(),
            error_message: String::new(),
            footnotes: Vec::new(),
            plot_obj_serialized: String::new(),
        }
    }

    /// Builder: set the dimensions
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder: set the aspect ratio (0 for free)
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    pub fn footnotes(&self) -> &[Footnote] {
        &self.footnotes
    }

    /// Path of the rendered image, empty if none
    pub fn image_path(&self) -> &str {
        &self.file_path_png
    }

    /// Record the path of an image rendered elsewhere
    pub fn set_image(&mut self, path: impl Into<String>) {
        self.file_path_png = path.into();
    }

    /// Record that writing the image failed
    pub fn set_image_error(&mut self, message: impl Into<String>) {
        self.file_path_png.clear();
        self.set_error(IMAGE_WRITE_ERROR, message);
    }

    /// Store the serialized plot object
    pub fn set_plot_object(&mut self, serialized: impl Into<String>) {
        self.plot_obj_serialized = serialized.into();
    }

    /// Serialized plot object, if one was stored
    pub fn plot_object(&self) -> Option<&str> {
        (!self.plot_obj_serialized.is_empty()).then_some(self.plot_obj_serialized.as_str())
    }

    /// Attach a footnote
    pub fn add_footnote(&mut self, message: impl Into<String>, symbol: impl Into<String>) {
        self.footnotes.push(Footnote::new(message).symbol(symbol));
    }

    /// Mark the plot as failed
    pub fn set_error(&mut self, error: impl Into<String>, message: impl Into<String>) {
        self.error = error.into();
        self.error_message = message.into();
        self.status = Status::Error;
    }

    /// Check if an error replaces the image
    pub fn has_error(&self) -> bool {
        !self.error.is_empty() || !self.error_message.is_empty()
    }

    /// Display document under the plot's unique nested name.
    pub fn data_entry(&self, nested_name: &str) -> PlotDocument {
        let error = self.has_error().then(|| ErrorEntry {
            kind: self.error.clone(),
            message: self.error_message.clone(),
        });
        let status = if error.is_some() {
            "error".to_string()
        } else {
            self.status.as_str().to_string()
        };

        PlotDocument {
            element_type: "image".to_string(),
            title: self.title.clone(),
            convertible: true,
            data: self.file_path_png.clone(),
            width: self.width,
            height: self.height,
            aspect_ratio: self.aspect_ratio,
            status,
            error,
            name: nested_name.to_string(),
            footnotes: self.footnotes.clone(),
        }
    }

    /// Render a text summary, every line starting with `prefix`.
    pub fn to_text(&self, prefix: &str) -> String {
        let mut out = String::new();
        header_to_text(&mut out, prefix, &self.title, self.status);
        out.push_str(&format!("{}aspectRatio: {}\n", prefix, self.aspect_ratio));
        out.push_str(&format!("{}dims:        {}X{}\n", prefix, self.width, self.height));
        if self.has_error() {
            out.push_str(&format!(
                "{}error:       '{}': '{}'\n",
                prefix, self.error, self.error_message
            ));
        }
        out.push_str(&format!("{}filePath:    {}\n", prefix, self.file_path_png));
        out.push_str(&format!(
            "{}has plot:    {}\n",
            prefix,
            if self.plot_object().is_some() { "yes" } else { "no" }
        ));
        footnotes_to_text(&mut out, prefix, &self.footnotes);
        out
    }

    /// Render an HTML fragment showing the image.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        open_element(&mut out, self.status, "jaspPlot", &self.title);

        if self.has_error() {
            error_to_html(&mut out, &self.error, &self.error_message);
        } else {
            out.push_str(&format!(
                "<img src=\"{}\" height=\"{}\" width=\"{}\" alt=\"a plot called {}\">\n",
                escape(&self.file_path_png),
                self.height,
                self.width,
                escape(&self.title)
            ));
        }

        footnotes_to_html(&mut out, &self.footnotes);
        out.push_str("</div>\n");
        out
    }

    /// Capture every field of the plot.
    pub fn to_snapshot(&self) -> PlotSnapshot {
        PlotSnapshot {
            element_type: "plot".to_string(),
            title: self.title.clone(),
            aspect_ratio: self.aspect_ratio,
            width: self.width,
            height: self.height,
            error: self.error.clone(),
            status: self.status,
            error_message: self.error_message.clone(),
            file_path_png: self.file_path_png.clone(),
            footnotes: self.footnotes.clone(),
            plot_obj_serialized: self.plot_obj_serialized.clone(),
        }
    }

    /// Rebuild a plot from a snapshot.
    pub fn from_snapshot(snapshot: PlotSnapshot) -> Self {
        Self {
            title: snapshot.title,
            width: snapshot.width,
            height: snapshot.height,
            aspect_ratio: snapshot.aspect_ratio,
            file_path_png: snapshot.file_path_png,
            status: snapshot.status,
            error: snapshot.error,
            error_message: snapshot.error_message,
            footnotes: snapshot.footnotes,
            plot_obj_serialized: snapshot.plot_obj_serialized,
        }
    }

    /// Snapshot as a JSON value.
    pub fn to_json_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self.to_snapshot())?)
    }

    /// Restore from a JSON snapshot value.
    pub fn from_json_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(ResultsError::InvalidSnapshot(
                "a plot snapshot must be a JSON object".to_string(),
            ));
        }
        if let Some(kind) = value.get("type").and_then(Value::as_str) {
            if kind != "plot" {
                return Err(ResultsError::InvalidSnapshot(format!(
                    "expected a plot snapshot, found '{}'",
                    kind
                )));
            }
        }

        let snapshot: PlotSnapshot = serde_json::from_value(value)?;
        Ok(Self::from_snapshot(snapshot))
    }
}

/// Display document of a plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotDocument {
    /// Always `"image"`
    #[serde(rename = "type")]
    pub element_type: String,
    pub title: String,
    pub convertible: bool,
    /// Path of the rendered image
    pub data: String,
    pub width: i32,
    pub height: i32,
    #[serde(rename = "aspectRatio")]
    pub aspect_ratio: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEntry>,
    pub name: String,
    pub footnotes: Vec<Footnote>,
}

/// Serialized form of a [`Plot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotSnapshot {
    #[serde(rename = "type")]
    pub element_type: String,
    pub title: String,
    pub aspect_ratio: f64,
    pub width: i32,
    pub height: i32,
    pub error: String,
    pub status: Status,
    pub error_message: String,
    pub file_path_png: String,
    pub footnotes: Vec<Footnote>,
    pub plot_obj_serialized: String,
}

impl Default for PlotSnapshot {
    fn default() -> Self {
        Self {
            element_type: "plot".to_string(),
            title: MISSING_TEXT.to_string(),
            aspect_ratio: 0.0,
            width: -1,
            height: -1,
            error: String::new(),
            status: Status::Complete,
            error_message: String::new(),
            file_path_png: MISSING_TEXT.to_string(),
            footnotes: Vec::new(),
            plot_obj_serialized: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_entry_layout() {
        let mut plot = Plot::new("Q-Q Plot").with_size(480, 320);
        plot.set_image("plots/1.png");
        plot.add_footnote("Standardized residuals", "");

        let doc = serde_json::to_value(plot.data_entry("qq")).unwrap();
        assert_eq!(doc["type"], json!("image"));
        assert_eq!(doc["data"], json!("plots/1.png"));
        assert_eq!(doc["width"], json!(480));
        assert_eq!(doc["convertible"], json!(true));
        assert_eq!(doc["status"], json!("complete"));
        assert_eq!(doc["footnotes"][0]["cols"], Value::Null);
        assert!(doc.get("error").is_none());
    }

    #[test]
    fn test_image_error() {
        let mut plot = Plot::new("Density");
        plot.set_image("stale.png");
        plot.set_image_error("device closed");

        assert_eq!(plot.status(), Status::Error);
        assert_eq!(plot.image_path(), "");
        let doc = serde_json::to_value(plot.data_entry("d")).unwrap();
        assert_eq!(doc["status"], json!("error"));
        assert_eq!(doc["error"]["type"], json!(IMAGE_WRITE_ERROR));

        let html = plot.to_html();
        assert!(html.contains(" msg: <i>'device closed'</i>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_text_summary() {
        let mut plot = Plot::new("Scatter").with_aspect_ratio(1.0);
        plot.set_plot_object("AAAA");
        let text = plot.to_text("");
        assert!(text.starts_with("Scatter\nstatus: complete\naspectRatio: 1\n"));
        assert!(text.contains("dims:        320X320\n"));
        assert!(text.contains("has plot:    yes\n"));
    }

    #[test]
    fn test_snapshot_round_trip_and_defaults() {
        let mut plot = Plot::new("Histogram").with_size(400, 300);
        plot.set_image("h.png");
        plot.set_plot_object("serialized");
        plot.add_footnote("binwidth 0.5", "*");

        let restored = Plot::from_json_value(plot.to_json_value().unwrap()).unwrap();
        assert_eq!(restored, plot);

        let empty = Plot::from_json_value(json!({})).unwrap();
        assert_eq!(empty.width(), -1);
        assert_eq!(empty.aspect_ratio(), 0.0);
        assert_eq!(empty.image_path(), "null");
        assert_eq!(empty.plot_object(), None);
        assert!(!empty.has_error());

        assert!(Plot::from_json_value(json!({"type": "table"})).is_err());
        assert!(Plot::from_json_value(json!("plot")).is_err());
    }
}
