//! The single HTML page served at `/`.

/// Page with a button that fetches `/generar` and shows the image inline.
/// On failure the server's error fragment is shown instead.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Generador de Reportes Agrícolas</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            background-color: #f4f6f8;
            text-align: center;
            padding: 40px;
        }

        h1 {
            color: #2b4b6f;
        }

        button {
            background-color: #2b4b6f;
            color: white;
            border: none;
            padding: 15px 30px;
            border-radius: 8px;
            font-size: 18px;
            cursor: pointer;
            margin-top: 20px;
        }

        button:hover {
            background-color: #1e354f;
        }

        button:disabled {
            opacity: 0.6;
            cursor: wait;
        }

        img {
            margin-top: 30px;
            max-width: 90%;
            border: 1px solid #ccc;
            border-radius: 10px;
            box-shadow: 0px 3px 8px rgba(0, 0, 0, 0.15);
        }
    </style>
</head>
<body>
    <h1>📄 Generador de Reportes Agrícolas</h1>
    <p>Presiona el botón para generar el reporte más reciente desde Google Sheets.</p>
    <button id="generar" onclick="generarReporte()">Generar Reporte</button>
    <div id="resultado"></div>

    <script>
        async function generarReporte() {
            const boton = document.getElementById('generar');
            const resultado = document.getElementById('resultado');
            boton.disabled = true;
            resultado.innerHTML = "<p>⏳ Generando reporte...</p>";
            try {
                const res = await fetch('/generar');
                if (!res.ok) {
                    resultado.innerHTML = await res.text();
                    return;
                }
                const blob = await res.blob();
                const url = URL.createObjectURL(blob);
                resultado.innerHTML = `<img src="${url}" alt="Reporte generado">`;
            } catch (e) {
                resultado.innerHTML = "<p style='color:red;'>⚠️ Error al generar el reporte.</p>";
            } finally {
                boton.disabled = false;
            }
        }
    </script>
</body>
</html>
"#;
