//! Handlers for the console demo application.

use vellum_ui::prelude::*;

const IDLE_BG: &str = "SystemButtonFace";
const IDLE_FG: &str = "black";

pub fn register(builder: HostBuilder) -> HostBuilder {
    builder.script("setup", setup).command("valid", valid)
}

/// Put the cursor in the command line.
fn setup(window: &Window) -> Result<()> {
    window.by_tag("command")?.focus()
}

/// Run the line typed into the command entry.
fn valid(window: &Window, entry: &Widget) -> Result<()> {
    let command = entry.text()?;
    let result = window.by_tag("result")?;
    result.set("bg", IDLE_BG)?;
    result.set("fg", IDLE_FG)?;
    entry.clear()?;

    match command.trim() {
        "" => result.clear(),
        "exit" => window.close(),
        "test" => result.set_text("Test"),
        "lang" => window.set_language_with(Localization::empty(), setup),
        line => match line.strip_prefix("lang ") {
            Some(lang) => {
                let lang = lang.trim();
                let table = window.host()?.load_localization((!lang.is_empty()).then_some(lang))?;
                window.set_language_with(table, setup)
            }
            None => {
                result.set("bg", "red")?;
                result.set("fg", "white")?;
                result.set_text("Command not found")
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    use vellum_ui::doc::Value;

    fn demo_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/console")
    }

    fn open_demo() -> (Host, Window, Rc<RefCell<HeadlessToolkit>>) {
        let tk = Rc::new(RefCell::new(HeadlessToolkit::new()));
        let builder = HostBuilder::from_manifest(demo_dir()).unwrap();
        let host = register(builder).shared_toolkit(tk.clone()).build();
        let table = host.load_localization(host.default_language()).unwrap();
        let main = host.load_interface(host.main_interface(), Some(&table)).unwrap();
        let window = host.create_window(main).unwrap();
        (host, window, tk)
    }

    fn submit(host: &Host, tk: &Rc<RefCell<HeadlessToolkit>>, line: &str) {
        tk.borrow_mut().push(Input::Type { target: "command".into(), text: line.to_string() });
        tk.borrow_mut().push(Input::Fire { target: "command".into(), event: "<Return>".into() });
        loop {
            let event = tk.borrow_mut().next_event();
            match event {
                Some(event) => host.handle_event(event).unwrap(),
                None => break,
            }
        }
    }

    fn result_text(window: &Window) -> String {
        window.by_tag("result").unwrap().text().unwrap()
    }

    #[test]
    fn setup_focuses_the_command_line() {
        let (_host, window, tk) = open_demo();
        assert_eq!(window.title().unwrap(), "Console");
        assert_eq!(result_text(&window), "Type a command");
        assert_eq!(tk.borrow().focused(), Some(window.by_tag("command").unwrap().native_handle()));
    }

    #[test]
    fn test_command_and_clearing() {
        let (host, window, tk) = open_demo();
        submit(&host, &tk, "test");
        assert_eq!(result_text(&window), "Test");
        assert_eq!(window.by_tag("command").unwrap().text().unwrap(), "");
        submit(&host, &tk, "");
        assert_eq!(result_text(&window), "");
    }

    #[test]
    fn unknown_command_turns_the_result_red() {
        let (host, window, tk) = open_demo();
        submit(&host, &tk, "launch");
        assert_eq!(result_text(&window), "Command not found");
        let result = window.by_tag("result").unwrap();
        {
            let tk = tk.borrow();
            let native = tk.widget(result.native_handle()).unwrap();
            assert_eq!(native.attributes.get("bg"), Some(&Value::from("red")));
            assert_eq!(native.attributes.get("fg"), Some(&Value::from("white")));
        }

        submit(&host, &tk, "test");
        let tk = tk.borrow();
        let native = tk.widget(result.native_handle()).unwrap();
        assert_eq!(native.attributes.get("bg"), Some(&Value::from(IDLE_BG)));
    }

    #[test]
    fn language_commands() {
        let (host, window, tk) = open_demo();
        submit(&host, &tk, "lang fr");
        assert_eq!(window.title().unwrap(), "Terminal");
        assert_eq!(result_text(&window), "Tapez une commande");
        assert_eq!(tk.borrow().focused(), Some(window.by_tag("command").unwrap().native_handle()));

        submit(&host, &tk, "lang");
        assert!(window.language().unwrap().is_empty());
        assert_eq!(result_text(&window), "");
        assert_eq!(window.title().unwrap(), "Untitled");

        submit(&host, &tk, "lang en");
        assert_eq!(window.title().unwrap(), "Console");
    }

    #[test]
    fn unknown_language_keeps_the_window() {
        let (host, window, _tk) = open_demo();
        let entry = window.by_tag("command").unwrap();
        entry.set_text("lang xx").unwrap();
        let err = window.dispatch("valid", &entry).unwrap_err();
        assert!(err.is_resource_not_found());
        assert_eq!(window.title().unwrap(), "Console");
        assert_eq!(host.windows().len(), 1);
    }

    #[test]
    fn exit_closes_the_window() {
        let (host, window, tk) = open_demo();
        submit(&host, &tk, "exit");
        assert!(!window.is_open());
        assert!(host.windows().is_empty());
        assert_eq!(tk.borrow().live_count(), 0);
    }
}
