use super::*;

const PREVIEW_STYLE: &str = "margin-top: 1rem; max-width: 300px;";
const IMAGE_STYLE: &str =
    "width: 100%; border-radius: 0.5rem; box-shadow: 0 4px 6px -1px rgb(0 0 0 / 0.1);";

pub(crate) fn preview_markup(data_url: &str) -> String {
    format!(
        r#"<img src="{}" alt="Preview" style="{IMAGE_STYLE}">"#,
        data_url.replace('&', "&amp;").replace('"', "&quot;")
    )
}

impl Page {
    pub(crate) fn install_image_preview(&mut self) -> Result<()> {
        if let Some(input) = self.dom.query_selector(markup::IMAGE_INPUT)? {
            self.add_listener(
                ListenerTarget::Node(input),
                "change",
                Handler::ReadImageFile { input },
            );
        }
        Ok(())
    }

    /// Starts reading the first picked file; the preview appears once the read completes.
    pub(crate) fn read_image_file(&mut self, input: NodeId) {
        let Some(file) = self.dom.files(input).first() else {
            return;
        };
        let data_url = format::data_url(&file.mime_type, &file.bytes);
        self.schedule_timeout(TimerCallback::FileLoaded { input, data_url }, 0);
    }

    pub(crate) fn show_image_preview(&mut self, input: NodeId, data_url: &str) -> Result<()> {
        let preview = match self.dom.query_selector(markup::IMAGE_PREVIEW)? {
            Some(preview) => preview,
            None => {
                let Some(host) = self.dom.parent_element(input) else {
                    return Ok(());
                };
                let preview = self.dom.create_detached_element("div");
                self.dom.class_add(preview, markup::IMAGE_PREVIEW_CLASS)?;
                self.dom.set_attr(preview, "style", PREVIEW_STYLE)?;
                self.dom.append_child(host, preview)?;
                preview
            }
        };
        self.dom.set_inner_html(preview, &preview_markup(data_url))
    }
}
