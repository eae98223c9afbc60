use anyhow::Result;
use clap::Parser;

use scribe::events::{InputEvent, KeyEvent, PasteEvent, PointerEvent, PointerKind};
use scribe::{Dom, Editor, EditorConfig, NodeId};

mod cli;

use cli::CliArgs;

fn main() -> Result<()> {
    scribe::logging::init();
    let args = CliArgs::parse();
    let config = EditorConfig::load();

    // Build the sample document: a single editable division holding the
    // initial content as one text node
    let initial = match &args.file {
        Some(path) => std::fs::read_to_string(path)?,
        None => "The quick brown fox.".to_string(),
    };
    let mut dom = Dom::new();
    let div = dom.create_element("div");
    let text = dom.create_text(initial.trim_end_matches('\n'));
    dom.append_child(div, text);

    let mut editor = Editor::with_config(dom, config);
    editor
        .attach(div)
        .map_err(|e| anyhow::anyhow!("attach failed: {e}"))?;

    // Click at the end of the text to place the caret
    let end = editor.document().text_len(text);
    editor.dispatch(InputEvent::Pointer(PointerEvent {
        kind: PointerKind::Click,
        target: text,
        offset: end,
    }));

    // Type the scripted text through the pipeline
    for ch in args.type_text.chars() {
        editor.dispatch(InputEvent::Key(KeyEvent::character(ch)));
    }

    if let Some(payload) = &args.paste {
        editor.dispatch(InputEvent::Paste(PasteEvent {
            content: payload.clone(),
        }));
    }

    println!("--- document after session ---");
    dump_tree(editor.document(), div, 0);
    println!("selection: {:?}", editor.selection().current());
    println!(
        "undo steps recorded: {}",
        editor.editable(div).map_or(0, |e| e.undo.undo_count())
    );

    if args.undo > 0 {
        for _ in 0..args.undo {
            if !editor
                .undo(div)
                .map_err(|e| anyhow::anyhow!("undo failed: {e}"))?
            {
                println!("nothing left to undo");
                break;
            }
        }
        println!("--- document after {} undo(s) ---", args.undo);
        dump_tree(editor.document(), div, 0);
    }

    editor
        .detach(div)
        .map_err(|e| anyhow::anyhow!("detach failed: {e}"))?;
    Ok(())
}

/// Print a subtree with indentation, one node per line
fn dump_tree(dom: &Dom, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    match dom.tag(id) {
        Some(tag) => {
            println!("{indent}<{tag}>");
            for &child in dom.children(id) {
                dump_tree(dom, child, depth + 1);
            }
        }
        None => println!("{indent}{:?}", dom.text(id)),
    }
}
