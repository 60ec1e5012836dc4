use shared::{BillFormError, LineItemRow, RowField};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LineItemEditorProps {
    pub rows: Vec<LineItemRow>,
    /// Last validation pass; row-scoped errors render inline here.
    pub errors: Vec<BillFormError>,
    pub disabled: bool,
    pub on_code_change: Callback<(usize, String)>,
    pub on_quantity_change: Callback<(usize, String)>,
    pub on_add: Callback<()>,
    pub on_remove: Callback<usize>,
}

/// Ordered, unbounded list of product rows. Rows are added with a
/// default quantity of 1 and removed immediately, no confirmation.
/// Duplicate product codes are allowed.
#[function_component(LineItemEditor)]
pub fn line_item_editor(props: &LineItemEditorProps) -> Html {
    let on_add = {
        let on_add = props.on_add.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_add.emit(());
        })
    };

    html! {
        <div id="items-container">
            {for props.rows.iter().enumerate().map(|(index, row)| {
                render_row(props, index, row)
            })}
            <button type="button" class="btn add-item" onclick={on_add} disabled={props.disabled}>
                {"+ Add Product"}
            </button>
        </div>
    }
}

fn render_row(props: &LineItemEditorProps, index: usize, row: &LineItemRow) -> Html {
    // Errors are reported 1-based to match what the operator sees.
    let row_number = index + 1;
    let code_invalid = props.errors.iter().any(|error| {
        error.row() == Some(row_number) && error.row_field() == Some(RowField::ProductCode)
    });
    let quantity_invalid = props.errors.iter().any(|error| {
        error.row() == Some(row_number) && error.row_field() == Some(RowField::Quantity)
    });
    let inline_messages: Vec<&'static str> = props
        .errors
        .iter()
        .filter(|error| error.row() == Some(row_number))
        .filter_map(|error| error.inline_message())
        .collect();

    let on_code_change = {
        let on_code_change = props.on_code_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_code_change.emit((index, input.value()));
        })
    };
    let on_quantity_change = {
        let on_quantity_change = props.on_quantity_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_quantity_change.emit((index, input.value()));
        })
    };
    let on_remove = {
        let on_remove = props.on_remove.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            on_remove.emit(index);
        })
    };

    html! {
        <div class="items-row">
            <input
                type="text"
                class={if code_invalid { "product-code input-error" } else { "product-code" }}
                placeholder="Product ID (e.g. P001)"
                value={row.product_code.clone()}
                onchange={on_code_change}
                disabled={props.disabled}
            />
            <input
                type="number"
                class={if quantity_invalid { "product-qty input-error" } else { "product-qty" }}
                min="1"
                value={row.quantity_input.clone()}
                onchange={on_quantity_change}
                disabled={props.disabled}
            />
            <button type="button" class="remove-row" onclick={on_remove} disabled={props.disabled}>
                {"Remove"}
            </button>
            {for inline_messages.iter().map(|message| {
                html! { <div class="field-error-msg">{*message}</div> }
            })}
        </div>
    }
}
