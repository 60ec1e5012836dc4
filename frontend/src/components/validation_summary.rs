use shared::BillFormError;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ValidationSummaryProps {
    /// Errors in validator order; rendered one bullet each.
    pub errors: Vec<BillFormError>,
}

/// Aggregate list of everything the last validation pass rejected.
#[function_component(ValidationSummary)]
pub fn validation_summary(props: &ValidationSummaryProps) -> Html {
    if props.errors.is_empty() {
        return html! {};
    }

    html! {
        <ul class="validation-errors">
            {for props.errors.iter().map(|error| {
                html! { <li>{error.message()}</li> }
            })}
        </ul>
    }
}
