use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use invite_editor_shared::dom::{
  PREVIEW_CONTAINER_ID,
  TEMPLATE_RADIO_SELECTOR
};
use invite_editor_shared::{
  EventFields,
  FormField,
  PreviewRequest,
  PreviewSession
};
use wasm_bindgen::{
  JsCast,
  JsValue
};
use web_sys::{
  Document,
  HtmlElement,
  HtmlIFrameElement,
  HtmlInputElement
};

use crate::api::fetch_template;
use crate::config::PreviewConfig;
use crate::dom::{
  FieldInput,
  optional_by_id,
  query_all_in_document
};
use crate::error::{
  EditorError,
  Result
};
use crate::ui_debug;

/// Elements the live preview reads from and
/// renders into, resolved once at mount.
pub struct PreviewElements {
  pub fields:          Vec<(
    FormField,
    FieldInput
  )>,
  pub template_radios:
    Vec<HtmlInputElement>,
  pub container:       HtmlElement
}

impl PreviewElements {
  /// `None` when the page has no preview container.
  /// With a container, every tracked field and at
  /// least one template radio must exist.
  pub fn resolve(
    document: &Document
  ) -> Result<Option<Self>> {
    let Some(container) = optional_by_id::<
      HtmlElement
    >(
      document,
      PREVIEW_CONTAINER_ID,
      "HtmlElement"
    )?
    else {
      return Ok(None);
    };

    let fields = FormField::all()
      .into_iter()
      .map(|field| {
        FieldInput::resolve(
          document,
          field.element_id()
        )
        .map(|input| (field, input))
      })
      .collect::<Result<Vec<_>>>()?;

    let template_radios =
      query_all_in_document::<
        HtmlInputElement
      >(
        document,
        TEMPLATE_RADIO_SELECTOR,
        "HtmlInputElement"
      )?;
    if template_radios.is_empty() {
      return Err(
        EditorError::MissingElement(
          TEMPLATE_RADIO_SELECTOR
            .to_string()
        )
      );
    }

    Ok(Some(Self {
      fields,
      template_radios,
      container
    }))
  }

  fn selected_template(
    &self
  ) -> Option<String> {
    self
      .template_radios
      .iter()
      .find(|radio| radio.checked())
      .map(HtmlInputElement::value)
  }

  fn read_fields(&self) -> EventFields {
    EventFields::collect(|field| {
      self
        .fields
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, input)| input.value())
        .unwrap_or_default()
    })
  }
}

struct PreviewInner {
  document: Document,
  elements: PreviewElements,
  session:  RefCell<PreviewSession>,
  config:   PreviewConfig
}

/// Live invitation preview for the event form.
///
/// Every tracked edit and every template change
/// fetches the template again and re-renders it into
/// a fresh iframe. Responses that arrive after a
/// newer request was issued are discarded.
pub struct PreviewController {
  inner:      Rc<PreviewInner>,
  _listeners: Vec<EventListener>
}

impl PreviewController {
  pub fn mount(
    document: Document,
    elements: PreviewElements,
    config: PreviewConfig
  ) -> Self {
    let session = PreviewSession::new(
      config.fallbacks.clone(),
      config.endpoint_prefix.clone()
    );
    let inner = Rc::new(PreviewInner {
      document,
      elements,
      session: RefCell::new(session),
      config
    });
    let listeners =
      install_listeners(&inner);

    tracing::info!(
      fields = inner.elements.fields.len(),
      templates = inner
        .elements
        .template_radios
        .len(),
      "mounted template preview"
    );

    let controller = Self {
      inner,
      _listeners: listeners
    };
    controller.refresh();
    controller
  }

  pub fn refresh(&self) {
    refresh(&self.inner);
  }
}

fn install_listeners(
  inner: &Rc<PreviewInner>
) -> Vec<EventListener> {
  let mut listeners = Vec::new();

  for (field, input) in
    &inner.elements.fields
  {
    let field = *field;
    let inner = Rc::clone(inner);
    listeners.push(EventListener::new(
      input.target(),
      "input",
      move |_event| {
        ui_debug(
          "preview-input",
          field.element_id()
        );
        refresh(&inner);
      }
    ));
  }

  for radio in
    &inner.elements.template_radios
  {
    let inner = Rc::clone(inner);
    let value = radio.value();
    listeners.push(EventListener::new(
      radio,
      "change",
      move |_event| {
        ui_debug(
          "preview-template",
          &value
        );
        refresh(&inner);
      }
    ));
  }

  listeners
}

fn refresh(inner: &Rc<PreviewInner>) {
  let selected =
    inner.elements.selected_template();
  let request = inner
    .session
    .borrow_mut()
    .begin(selected.as_deref());
  let Some(request) = request else {
    ui_debug(
      "preview",
      "no template selected"
    );
    return;
  };

  tracing::debug!(
    generation = request.generation,
    template = %request.template,
    "requesting template preview"
  );

  let inner = Rc::clone(inner);
  wasm_bindgen_futures::spawn_local(
    async move {
      match fetch_template(&request.path)
        .await
      {
        | Ok(markup) => {
          apply_response(
            &inner, &request, &markup
          );
        }
        | Err(error) => {
          tracing::warn!(
            %error,
            template = %request.template,
            "template preview fetch failed"
          );
        }
      }
    }
  );
}

fn apply_response(
  inner: &PreviewInner,
  request: &PreviewRequest,
  markup: &str
) {
  let fields = inner.elements.read_fields();
  let rendered = inner
    .session
    .borrow()
    .complete(request, markup, &fields);
  let Some(html) = rendered else {
    tracing::debug!(
      generation = request.generation,
      latest = inner
        .session
        .borrow()
        .latest_generation(),
      "dropping stale template preview"
    );
    return;
  };

  if let Err(error) =
    render_into_frame(inner, &html)
  {
    tracing::warn!(
      %error,
      "failed to render template preview"
    );
  }
}

fn render_into_frame(
  inner: &PreviewInner,
  html: &str
) -> Result<()> {
  let container = &inner.elements.container;
  container.set_inner_html("");

  let iframe = inner
    .document
    .create_element("iframe")
    .map_err(|value| {
      EditorError::js(
        "create iframe",
        value
      )
    })?
    .dyn_into::<HtmlIFrameElement>()
    .map_err(|_| {
      EditorError::WrongElementType {
        selector: "iframe".to_string(),
        expected: "HtmlIFrameElement"
      }
    })?;

  let style = iframe.style();
  let min_height = format!(
    "{}px",
    inner.config.min_height_px
  );
  for (property, value) in [
    ("width", "100%"),
    ("min-height", min_height.as_str()),
    ("border", "none")
  ] {
    style
      .set_property(property, value)
      .map_err(|error| {
        EditorError::js(
          "style preview iframe",
          error
        )
      })?;
  }

  container
    .append_child(&iframe)
    .map_err(|value| {
      EditorError::js(
        "append preview iframe",
        value
      )
    })?;

  let frame_document =
    iframe.content_document().ok_or_else(
      || {
        EditorError::MissingElement(
          "preview iframe document"
            .to_string()
        )
      }
    )?;
  frame_document.open().map_err(|value| {
    EditorError::js(
      "open preview document",
      value
    )
  })?;
  frame_document
    .write(&js_sys::Array::of1(
      &JsValue::from_str(html)
    ))
    .map_err(|value| {
      EditorError::js(
        "write preview document",
        value
      )
    })?;
  frame_document.close().map_err(
    |value| {
      EditorError::js(
        "close preview document",
        value
      )
    }
  )?;

  schedule_resize(
    iframe,
    inner.config.resize_delay_ms,
    inner.config.height_margin_px
  );
  Ok(())
}

/// Sizes `iframe` to its content once the delay has
/// passed. Content that keeps loading afterwards is
/// not measured again.
fn schedule_resize(
  iframe: HtmlIFrameElement,
  delay_ms: u32,
  margin_px: i32
) {
  Timeout::new(delay_ms, move || {
    let Some(body) = iframe
      .content_document()
      .and_then(|document| document.body())
    else {
      return;
    };
    let height =
      body.scroll_height() + margin_px;
    if let Err(error) = iframe
      .style()
      .set_property(
        "height",
        &format!("{height}px")
      )
    {
      tracing::warn!(
        ?error,
        "failed to resize preview iframe"
      );
    }
  })
  .forget();
}
